//! Service configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default poll period, matching the binding's refresh default
pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 1000;

/// Configuration for a [`MainTvService`](crate::MainTvService) instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Unique device name of the TV on the UPnP bus
    pub udn: String,

    /// Poll period in milliseconds
    #[serde(default = "default_polling_interval_ms")]
    pub polling_interval_ms: u64,
}

impl ServiceConfig {
    /// Configuration with the default poll period
    pub fn new(udn: impl Into<String>) -> Self {
        Self {
            udn: udn.into(),
            polling_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
        }
    }

    /// Poll period as a [`Duration`]
    pub fn polling_interval(&self) -> Duration {
        Duration::from_millis(self.polling_interval_ms)
    }
}

fn default_polling_interval_ms() -> u64 {
    DEFAULT_POLLING_INTERVAL_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::new("uuid:0dd0b4ce-0000-1000-8000-0024e91a55cc");
        assert_eq!(config.polling_interval(), Duration::from_millis(1000));
    }
}
