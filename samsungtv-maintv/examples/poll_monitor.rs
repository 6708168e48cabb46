//! Poll a simulated TV and print every channel update.
//!
//! Run with logging enabled to watch the poll loop work:
//!
//! ```sh
//! SAMSUNGTV_LOG_MODE=development cargo run --example poll_monitor
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use samsungtv_maintv::{
    logging, ActionResponse, Channel, ChannelValue, EventListener, MainTvService, ServiceConfig,
    Severity, UpnpIo,
};

/// Simulated TV that hops to the next broadcast channel every few polls
struct SimulatedTv {
    polls: AtomicUsize,
}

impl UpnpIo for SimulatedTv {
    fn is_registered(&self, _udn: &str) -> bool {
        true
    }

    fn invoke_action(
        &self,
        _udn: &str,
        _service_id: &str,
        action: &str,
        _inputs: Option<&[(&str, &str)]>,
    ) -> ActionResponse {
        match action {
            "GetCurrentMainTVChannel" => {
                let major = 1 + self.polls.fetch_add(1, Ordering::SeqCst) / 4;
                let xml = format!("<Channel><MajorCh>{}</MajorCh></Channel>", major);
                ActionResponse::from_pairs([("Result", "OK".to_string()), ("CurrentChannel", xml)])
            }
            "GetCurrentExternalSource" => {
                ActionResponse::from_pairs([("Result", "OK"), ("CurrentExternalSource", "TV")])
            }
            _ => ActionResponse::new(),
        }
    }
}

struct PrintListener;

impl EventListener for PrintListener {
    fn on_value_received(&self, channel: Channel, value: ChannelValue) {
        println!("{} -> {}", channel, value);
    }

    fn on_error(&self, severity: Severity, message: &str) {
        eprintln!("[{}] {}", severity, message);
    }
}

fn main() {
    if let Err(e) = logging::init_logging_from_env() {
        eprintln!("logging setup failed: {}", e);
    }

    let mut config = ServiceConfig::new("uuid:simulated-tv");
    config.polling_interval_ms = 500;

    let service = MainTvService::new(
        Arc::new(SimulatedTv {
            polls: AtomicUsize::new(0),
        }),
        config,
    );
    service.add_listener(Arc::new(PrintListener));

    service.start();
    std::thread::sleep(Duration::from_secs(5));
    service.stop();
}
