//! # Boundary Results
//!
//! Both flows surface as `{success, ...}` JSON to whoever renders them:
//!
//! ```text
//! {"success":true,"token":{..}}           {"success":false,"error":".."}
//! {"success":true,"message":".."}         {"success":false,"error":".."}
//! ```

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::entities::Token;
use super::errors::{LinkError, UnlinkError};

/// Message returned by a successful unlink.
pub const UNLINK_SUCCESS_MESSAGE: &str = "Accounts were successfully un-linked";

/// Result of a link request at the boundary.
#[derive(Debug)]
pub enum LinkOutcome {
    Linked(Token),
    Failed(LinkError),
}

impl LinkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LinkOutcome::Linked(_))
    }
}

impl From<Result<Token, LinkError>> for LinkOutcome {
    fn from(result: Result<Token, LinkError>) -> Self {
        match result {
            Ok(token) => LinkOutcome::Linked(token),
            Err(error) => LinkOutcome::Failed(error),
        }
    }
}

impl Serialize for LinkOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LinkOutcome", 2)?;
        match self {
            LinkOutcome::Linked(token) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("token", token)?;
            }
            LinkOutcome::Failed(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &error.to_string())?;
            }
        }
        state.end()
    }
}

/// Result of an unlink request. Unlinking never fails outright.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Unlinked,
    Rejected(UnlinkError),
}

impl UnlinkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UnlinkOutcome::Unlinked)
    }

    /// The rejection, if any.
    pub fn error(&self) -> Option<&UnlinkError> {
        match self {
            UnlinkOutcome::Unlinked => None,
            UnlinkOutcome::Rejected(error) => Some(error),
        }
    }
}

impl From<Result<(), UnlinkError>> for UnlinkOutcome {
    fn from(result: Result<(), UnlinkError>) -> Self {
        match result {
            Ok(()) => UnlinkOutcome::Unlinked,
            Err(error) => UnlinkOutcome::Rejected(error),
        }
    }
}

impl Serialize for UnlinkOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UnlinkOutcome", 2)?;
        match self {
            UnlinkOutcome::Unlinked => {
                state.serialize_field("success", &true)?;
                state.serialize_field("message", UNLINK_SUCCESS_MESSAGE)?;
            }
            UnlinkOutcome::Rejected(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", &error.to_string())?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlink_outcome_json() {
        assert_eq!(
            serde_json::to_string(&UnlinkOutcome::Unlinked).unwrap(),
            r#"{"success":true,"message":"Accounts were successfully un-linked"}"#
        );
        assert_eq!(
            serde_json::to_string(&UnlinkOutcome::Rejected(UnlinkError::NotLinked)).unwrap(),
            r#"{"success":false,"error":"Web 2 account is not linked"}"#
        );
    }

    #[test]
    fn test_link_outcome_failure_json() {
        let outcome = LinkOutcome::from(Err::<Token, _>(LinkError::AlreadyLinked));

        assert!(!outcome.is_success());
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"success":false,"error":"Web 2 account already linked"}"#
        );
    }
}
