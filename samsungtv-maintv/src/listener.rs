//! Listener interface for channel updates and error reports

use crate::channel::{Channel, ChannelValue};

/// Severity of an error reported to listeners
///
/// Reserved for failures reported by the transport collaborator
/// (registration, subscription); protocol-level `Result` failures are
/// logged locally instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Communication with the device failed
    Communication,
    /// The service is misconfigured
    Configuration,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Communication => f.write_str("communication"),
            Severity::Configuration => f.write_str("configuration"),
        }
    }
}

/// Receiver of channel updates from the service
///
/// Listeners are registered as `Arc<dyn EventListener>` and may be added
/// or removed at any time, including from inside a callback; dispatch
/// iterates a snapshot of the set taken when the pass starts.
pub trait EventListener: Send + Sync {
    /// A tracked channel's value changed
    fn on_value_received(&self, channel: Channel, value: ChannelValue);

    /// The transport collaborator reported a failure
    fn on_error(&self, severity: Severity, message: &str);
}
