//! Observability for the student records service
//!
//! - `tracing` subscriber setup (fmt output, `RUST_LOG` aware)
//! - Typed lifecycle events
//!
//! # Usage
//!
//! ```ignore
//! use student_records::observability::{init_tracing, log_event, Event};
//!
//! init_tracing("info");
//! log_event(Event::BootStart);
//! ```

mod events;

pub use events::Event;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `level` when it is set and parses. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_tracing(level: &str) {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    if event.is_fatal() {
        tracing::error!(event = event.as_str(), "lifecycle");
    } else {
        tracing::info!(event = event.as_str(), "lifecycle");
    }
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let rendered = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ");

    if event.is_fatal() {
        tracing::error!(event = event.as_str(), fields = %rendered, "lifecycle");
    } else {
        tracing::info!(event = event.as_str(), fields = %rendered, "lifecycle");
    }
}
