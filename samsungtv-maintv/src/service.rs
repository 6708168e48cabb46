//! The MainTVServer service client
//!
//! Owns the poll loop, the change-detection cache and the listener set,
//! and executes inbound commands against the remote agent. All remote
//! calls go through [`Inner::invoke`], which routes every response field
//! through the cache so poll results and command responses share one
//! notification path.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use field_store::FieldStore;
use samsungtv_parser::{extract_records, parse_document};

use crate::channel::{Channel, ChannelValue, Command};
use crate::config::ServiceConfig;
use crate::dispatch;
use crate::listener::{EventListener, Severity};
use crate::transport::{ActionResponse, UpnpIo};

/// UPnP service this client drives
pub const SERVICE_NAME: &str = "MainTVServer2";

/// Remote service endpoint all actions are invoked against
const AGENT_ID: &str = "MainTVAgent2";

/// Read-only query actions issued on every poll cycle
const POLL_ACTIONS: [&str; 4] = [
    "GetCurrentMainTVChannel",
    "GetCurrentExternalSource",
    "GetCurrentContentRecognition",
    "GetCurrentBrowserURL",
];

const ACTION_GET_SOURCE_LIST: &str = "GetSourceList";
const ACTION_SET_MAIN_TV_SOURCE: &str = "SetMainTVSource";
const ACTION_RUN_BROWSER: &str = "RunBrowser";
const ACTION_STOP_BROWSER: &str = "StopBrowser";

const FIELD_SOURCE_LIST: &str = "SourceList";
const FIELD_CURRENT_EXTERNAL_SOURCE: &str = "CurrentExternalSource";
const FIELD_BROWSER_URL: &str = "BrowserURL";

/// Channels this service accepts commands on, in announcement order
const SUPPORTED_COMMAND_CHANNELS: [Channel; 3] = [
    Channel::SourceName,
    Channel::BrowserUrl,
    Channel::StopBrowser,
];

/// Polling client for the Samsung TV MainTVServer service
///
/// Lifecycle: [`start`](MainTvService::start) spawns the background poll
/// task, [`stop`](MainTvService::stop) cancels the next cycle and waits
/// for an in-flight one to finish. Both are idempotent. Command handling
/// runs on the caller's thread and never raises; protocol failures are
/// logged and absorbed.
pub struct MainTvService {
    inner: Arc<Inner>,
    poll_task: Mutex<Option<PollTask>>,
}

struct Inner {
    transport: Arc<dyn UpnpIo>,
    config: ServiceConfig,
    cache: FieldStore,
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

struct PollTask {
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl MainTvService {
    /// Create a service for the device described by `config`
    pub fn new(transport: Arc<dyn UpnpIo>, config: ServiceConfig) -> Self {
        debug!(udn = %config.udn, "Creating MainTVServer service");
        Self {
            inner: Arc::new(Inner {
                transport,
                config,
                cache: FieldStore::new(),
                listeners: RwLock::new(Vec::new()),
            }),
            poll_task: Mutex::new(None),
        }
    }

    /// Channels this service transmits commands for, in announcement order
    pub fn supported_channels(&self) -> &'static [Channel] {
        &SUPPORTED_COMMAND_CHANNELS
    }

    /// Register a listener; a listener already registered is not added twice
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) {
        let mut listeners = self.inner.listeners.write();
        if !listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Unregister a listener by identity
    pub fn remove_listener(&self, listener: &Arc<dyn EventListener>) {
        self.inner
            .listeners
            .write()
            .retain(|l| !Arc::ptr_eq(l, listener));
    }

    /// Start the background poll task; a no-op while already running
    pub fn start(&self) {
        let mut task = self.poll_task.lock();
        if task.is_some() {
            return;
        }

        debug!(
            interval_ms = self.inner.config.polling_interval_ms,
            "Starting poll task"
        );

        let inner = Arc::clone(&self.inner);
        let interval = self.inner.config.polling_interval();
        let (stop_tx, stop_rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("maintv-poll".to_string())
            .spawn(move || loop {
                inner.poll_cycle();
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop signal, or the service side of the channel is gone
                    _ => break,
                }
            });

        match spawned {
            Ok(handle) => *task = Some(PollTask { stop_tx, handle }),
            Err(e) => warn!(error = %e, "Failed to spawn poll thread"),
        }
    }

    /// Stop the background poll task; a no-op while already stopped
    ///
    /// Cancels the next scheduled cycle and waits for an in-flight cycle
    /// to complete.
    pub fn stop(&self) {
        let task = self.poll_task.lock().take();
        if let Some(task) = task {
            debug!("Stopping poll task");
            let _ = task.stop_tx.send(());
            let _ = task.handle.join();
        }
    }

    /// Wipe the change-detection cache, forcing a full re-announcement on
    /// the next poll cycle
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Execute an inbound command on the caller's thread
    ///
    /// Always returns normally; protocol failures and unsupported
    /// channels are logged.
    pub fn handle_command(&self, channel_id: &str, value: &str) {
        debug!(channel = channel_id, command = value, "Received command");

        match Command::from_channel(channel_id, value) {
            Command::SelectSource(source) => {
                self.inner.select_source(&source);
                // Force the next poll to re-announce the active source,
                // even if the device reports a string-identical value
                self.inner.cache.invalidate(FIELD_CURRENT_EXTERNAL_SOURCE);
            }
            Command::SetBrowserUrl(url) => {
                self.inner.set_browser_url(&url);
                self.inner.cache.invalidate(FIELD_BROWSER_URL);
            }
            Command::StopBrowser => {
                self.inner.stop_browser();
            }
            Command::Unknown(id) => {
                warn!(channel = %id, "TV doesn't support transmitting for this channel");
            }
        }
    }

    /// Registration status callback from the transport collaborator
    pub fn on_status_changed(&self, status: bool) {
        debug!(status, "Device registration status changed");
    }

    /// Subscription callback from the transport collaborator
    pub fn on_service_subscribed(&self, service: &str, succeeded: bool) {
        if succeeded {
            debug!(service, "Subscribed to service events");
        } else {
            warn!(service, "Service event subscription failed");
            self.inner.report_error(
                Severity::Communication,
                &format!("Subscription to {} failed", service),
            );
        }
    }
}

impl Drop for MainTvService {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Inner {
    /// One poll cycle: skip silently if the device is unreachable,
    /// otherwise run the fixed query battery
    fn poll_cycle(&self) {
        if !self.transport.is_registered(&self.config.udn) {
            trace!(udn = %self.config.udn, "Device not registered, skipping poll cycle");
            return;
        }

        // Queries are independent; one failing or coming back empty does
        // not stop the others
        for action in POLL_ACTIONS {
            self.invoke(action, None);
        }
    }

    /// Invoke a remote action and route its response fields through the
    /// cache and, where changed, out to listeners
    fn invoke(&self, action: &str, inputs: Option<&[(&str, &str)]>) -> ActionResponse {
        let response = self
            .transport
            .invoke_action(&self.config.udn, AGENT_ID, action, inputs);

        for (field, value) in response.fields() {
            self.ingest(field, Some(value));
        }

        response
    }

    fn ingest(&self, field: &str, value: Option<&str>) {
        if !self.cache.ingest(field, value) {
            trace!(field, "Value hasn't changed, ignoring update");
            return;
        }

        if let Some((channel, typed)) = dispatch::convert(field, value) {
            self.notify(channel, typed);
        }
    }

    /// Deliver a channel update to every listener registered at the start
    /// of the pass
    fn notify(&self, channel: Channel, value: ChannelValue) {
        let snapshot: Vec<Arc<dyn EventListener>> = self.listeners.read().clone();
        for listener in snapshot {
            listener.on_value_received(channel, value.clone());
        }
    }

    fn report_error(&self, severity: Severity, message: &str) {
        let snapshot: Vec<Arc<dyn EventListener>> = self.listeners.read().clone();
        for listener in snapshot {
            listener.on_error(severity, message);
        }
    }

    /// Two-phase source switch: resolve the source name to its id via
    /// `GetSourceList`, then issue `SetMainTVSource`
    ///
    /// The write is never attempted when resolution fails; sending a
    /// made-up id would put the TV in an undefined state.
    fn select_source(&self, source: &str) {
        let response = self.invoke(ACTION_GET_SOURCE_LIST, None);

        if let Err(failure) = response.check() {
            warn!(%failure, "Source list query failed");
            return;
        }

        let id = response
            .get(FIELD_SOURCE_LIST)
            .and_then(|xml| parse_document(xml).ok())
            .map(|doc| extract_records(&doc, "Source", "SourceType", "ID"))
            .and_then(|mut sources| sources.remove(source));

        match id {
            Some(id) => {
                let inputs = [("Source", source), ("ID", id.as_str()), ("UiID", "0")];
                let response = self.invoke(ACTION_SET_MAIN_TV_SOURCE, Some(&inputs));
                match response.check() {
                    Ok(()) => debug!(source, id = %id, "Source switch executed"),
                    Err(failure) => warn!(%failure, "Source switch failed"),
                }
            }
            None => warn!(source, "Source id couldn't be found"),
        }
    }

    fn set_browser_url(&self, url: &str) {
        let inputs = [(FIELD_BROWSER_URL, url)];
        let response = self.invoke(ACTION_RUN_BROWSER, Some(&inputs));
        match response.check() {
            Ok(()) => debug!(url, "Browser opened"),
            Err(failure) => warn!(%failure, "Browser open failed"),
        }
    }

    fn stop_browser(&self) {
        let response = self.invoke(ACTION_STOP_BROWSER, None);
        match response.check() {
            Ok(()) => debug!("Browser stopped"),
            Err(failure) => warn!(%failure, "Browser stop failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullTransport;

    impl UpnpIo for NullTransport {
        fn is_registered(&self, _udn: &str) -> bool {
            false
        }

        fn invoke_action(
            &self,
            _udn: &str,
            _service_id: &str,
            _action: &str,
            _inputs: Option<&[(&str, &str)]>,
        ) -> ActionResponse {
            ActionResponse::new()
        }
    }

    struct NullListener;

    impl EventListener for NullListener {
        fn on_value_received(&self, _channel: Channel, _value: ChannelValue) {}
        fn on_error(&self, _severity: Severity, _message: &str) {}
    }

    fn service() -> MainTvService {
        MainTvService::new(Arc::new(NullTransport), ServiceConfig::new("uuid:test"))
    }

    #[test]
    fn test_supported_channels_order() {
        let ids: Vec<&str> = service()
            .supported_channels()
            .iter()
            .map(|c| c.id())
            .collect();
        assert_eq!(ids, ["sourceName", "browserUrl", "stopBrowser"]);
    }

    #[test]
    fn test_listener_registration_is_identity_based() {
        let service = service();
        let listener: Arc<dyn EventListener> = Arc::new(NullListener);

        service.add_listener(Arc::clone(&listener));
        service.add_listener(Arc::clone(&listener));
        assert_eq!(service.inner.listeners.read().len(), 1);

        service.remove_listener(&listener);
        assert!(service.inner.listeners.read().is_empty());

        // Removing an unregistered listener is a no-op
        service.remove_listener(&listener);
    }

    #[test]
    fn test_start_stop_idempotent() {
        let service = service();

        service.start();
        service.start();
        assert!(service.poll_task.lock().is_some());

        service.stop();
        assert!(service.poll_task.lock().is_none());
        service.stop();
    }
}
