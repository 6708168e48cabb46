//! Transport interface consumed by the service
//!
//! The actual UPnP session layer (discovery, registration, the SOAP round
//! trip) lives behind [`UpnpIo`]. The MainTVServer protocol does not signal
//! action failures as transport errors: the device answers with a flat
//! field map whose `Result` field carries `OK` or a rejection string, and
//! an unreachable device simply yields an empty map. [`ActionResponse`]
//! keeps that convention explicit.

use std::collections::HashMap;

use thiserror::Error;

/// Field carrying the device's verdict on an action
pub const RESULT_FIELD: &str = "Result";

/// Value of [`RESULT_FIELD`] on success
pub const RESULT_OK: &str = "OK";

/// Synchronous UPnP I/O collaborator
///
/// Implementations block the calling thread until the device answers or
/// the transport's own timeout fires; no timeout logic lives on this side
/// of the seam.
pub trait UpnpIo: Send + Sync {
    /// Whether the device with the given UDN is currently registered
    /// and reachable
    fn is_registered(&self, udn: &str) -> bool;

    /// Invoke a remote action and return its response fields
    ///
    /// `inputs` are the action's named parameters, or `None` for
    /// parameterless actions. Failures are value-encoded in the returned
    /// map per the protocol convention; an empty map reads as a failed
    /// call (no `Result` field).
    fn invoke_action(
        &self,
        udn: &str,
        service_id: &str,
        action: &str,
        inputs: Option<&[(&str, &str)]>,
    ) -> ActionResponse;
}

/// Flat field→value mapping returned by a remote action
#[derive(Debug, Clone, Default)]
pub struct ActionResponse {
    fields: HashMap<String, String>,
}

impl ActionResponse {
    /// Create an empty response (reads as a failed call)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a response from (field, value) pairs
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a response field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Iterate over all (field, value) pairs
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check the device's verdict on the action
    pub fn check(&self) -> Result<(), ActionFailure> {
        match self.get(RESULT_FIELD) {
            Some(RESULT_OK) => Ok(()),
            Some(other) => Err(ActionFailure::Rejected(other.to_string())),
            None => Err(ActionFailure::MissingResult),
        }
    }

    /// Whether the device reported success
    pub fn is_ok(&self) -> bool {
        self.check().is_ok()
    }
}

/// Value-encoded failure of a remote action
#[derive(Debug, Error)]
pub enum ActionFailure {
    /// The device answered but rejected the action
    #[error("device rejected the action, result='{0}'")]
    Rejected(String),

    /// The response carried no `Result` field at all
    #[error("response carried no Result field")]
    MissingResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ok() {
        let response = ActionResponse::from_pairs([("Result", "OK")]);
        assert!(response.is_ok());
    }

    #[test]
    fn test_check_rejected() {
        let response = ActionResponse::from_pairs([("Result", "Failed")]);
        match response.check() {
            Err(ActionFailure::Rejected(result)) => assert_eq!(result, "Failed"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_response_is_a_failure() {
        let response = ActionResponse::new();
        assert!(matches!(
            response.check(),
            Err(ActionFailure::MissingResult)
        ));
    }

    #[test]
    fn test_fields_iteration() {
        let response =
            ActionResponse::from_pairs([("Result", "OK"), ("BrowserURL", "http://example.org")]);
        let fields: HashMap<&str, &str> = response.fields().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["BrowserURL"], "http://example.org");
    }
}
