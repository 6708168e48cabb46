//! # samsungtv-maintv
//!
//! Polling client for the Samsung TV `MainTVServer2` UPnP service.
//!
//! The service periodically queries the TV's `MainTVAgent2` endpoint for
//! the current channel, external source, content-recognition state and
//! browser URL, diffs each reported field against a last-observed cache,
//! and notifies registered listeners with typed values only when something
//! actually changed. Inbound commands (switch source, open/stop the
//! browser) run a resolve-then-act write protocol against the same
//! endpoint and invalidate the relevant cache entry so the next poll
//! re-announces the device's true state.
//!
//! The UPnP session layer itself is out of scope and consumed through the
//! [`UpnpIo`] trait.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use samsungtv_maintv::{MainTvService, ServiceConfig};
//!
//! let service = MainTvService::new(transport, ServiceConfig::new(udn));
//! service.add_listener(listener);
//! service.start();
//! service.handle_command("sourceName", "HDMI1");
//! service.stop();
//! ```

mod channel;
mod config;
mod dispatch;
mod listener;
mod service;
mod transport;

pub mod logging;

pub use channel::{Channel, ChannelValue, Command};
pub use config::{ServiceConfig, DEFAULT_POLLING_INTERVAL_MS};
pub use listener::{EventListener, Severity};
pub use service::{MainTvService, SERVICE_NAME};
pub use transport::{ActionFailure, ActionResponse, UpnpIo, RESULT_FIELD, RESULT_OK};
