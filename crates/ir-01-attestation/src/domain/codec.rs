//! # Attestation Codec
//!
//! Canonical serialization of attestation messages and parsing of the
//! decrypted payload users return when unlinking.
//!
//! ## Invariant
//!
//! `canonicalize` output is byte-stable: compact JSON, fixed key order,
//! checksummed address. `decode` only accepts messages that re-encode to the
//! exact same bytes.

use shared_crypto::SaltedMessage;

use super::entities::{AttestationFields, AttestationMessage, SignedAttestation, ATTESTATION_SERVICE};
use super::errors::AttestationError;

/// Produce the canonical attestation message for a binding.
pub fn canonicalize(fields: &AttestationFields) -> Result<String, AttestationError> {
    encode(&AttestationMessage::from(fields))
}

/// Parse a canonical attestation message.
///
/// # Errors
///
/// `InvalidAttestation` if the text is not JSON of the expected shape, names a
/// different service, or is not in canonical form.
pub fn decode(message: &str) -> Result<AttestationMessage, AttestationError> {
    let decoded: AttestationMessage = serde_json::from_str(message)
        .map_err(|e| AttestationError::invalid(format!("malformed message: {e}")))?;

    if decoded.service != ATTESTATION_SERVICE {
        return Err(AttestationError::invalid(format!(
            "unexpected service {}",
            decoded.service
        )));
    }

    if encode(&decoded)? != message {
        return Err(AttestationError::invalid("message is not canonical"));
    }

    Ok(decoded)
}

/// Parse the decrypted unlink payload `{"salt":..,"message":..}` where
/// `message` is itself the JSON of a [`SignedAttestation`].
pub fn parse_decrypted_attestation(raw: &str) -> Result<SignedAttestation, AttestationError> {
    let salted: SaltedMessage = serde_json::from_str(raw)
        .map_err(|e| AttestationError::invalid(format!("malformed payload: {e}")))?;

    if salted.message.is_empty() {
        return Err(AttestationError::invalid("empty message"));
    }

    let signed: SignedAttestation = serde_json::from_str(&salted.message)
        .map_err(|e| AttestationError::invalid(format!("malformed message: {e}")))?;

    if signed.attestation_message.is_empty() || signed.backend_attestation_signature.is_empty() {
        return Err(AttestationError::invalid("missing attestation fields"));
    }

    Ok(signed)
}

fn encode(message: &AttestationMessage) -> Result<String, AttestationError> {
    serde_json::to_string(message).map_err(|e| AttestationError::Serialization(e.to_string()))
}
