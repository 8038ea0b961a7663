//! # Domain Entities
//!
//! The attestation message, its signed envelope and the inputs used to build it.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Web2Provider};

/// Value of the `service` field in every attestation.
pub const ATTESTATION_SERVICE: &str = "InterRep";

/// Inputs to [`canonicalize`](crate::canonicalize).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttestationFields {
    /// Account id at the web2 provider.
    pub provider_account_id: String,
    /// The web2 provider.
    pub provider: Web2Provider,
    /// Address receiving the badge.
    pub address: Address,
    /// Badge token id, decimal.
    pub decimal_id: String,
}

/// Decoded attestation message.
///
/// Field declaration order IS the canonical key order; serde_json emits
/// struct fields in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttestationMessage {
    pub service: String,
    pub decimal_id: String,
    pub user_address: Address,
    pub web2_provider: Web2Provider,
    pub provider_account_id: String,
}

impl From<&AttestationFields> for AttestationMessage {
    fn from(fields: &AttestationFields) -> Self {
        Self {
            service: ATTESTATION_SERVICE.to_string(),
            decimal_id: fields.decimal_id.clone(),
            user_address: fields.address,
            web2_provider: fields.provider,
            provider_account_id: fields.provider_account_id.clone(),
        }
    }
}

/// Canonical message plus the backend signature over it.
///
/// This is the document encrypted to the user at link time and handed back,
/// decrypted, at unlink time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAttestation {
    pub attestation_message: String,
    pub backend_attestation_signature: String,
}

impl SignedAttestation {
    /// Compact JSON form, `{"attestationMessage":..,"backendAttestationSignature":..}`.
    pub fn to_json(&self) -> Result<String, crate::AttestationError> {
        serde_json::to_string(self)
            .map_err(|e| crate::AttestationError::Serialization(e.to_string()))
    }
}
