//! Lifecycle events for the student records service
//!
//! Events are explicit and typed. Per-request logging goes through
//! `tracing` directly; this enum only covers process lifecycle.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration resolved from flags, env and `.env`
    ConfigLoaded,
    /// Store handle constructed
    StoreConnected,
    /// Listener bound, ready to serve
    ServerListening,
    /// Shutdown signal received
    ShutdownStart,
    /// Server drained and stopped
    ShutdownComplete,
    /// Startup aborted (FATAL)
    StartupFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::StartupFailed => "STARTUP_FAILED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StartupFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "STARTUP_BEGIN");
        assert_eq!(Event::ServerListening.to_string(), "SERVER_LISTENING");
    }

    #[test]
    fn test_only_startup_failure_is_fatal() {
        assert!(Event::StartupFailed.is_fatal());
        assert!(!Event::StoreConnected.is_fatal());
        assert!(!Event::ShutdownComplete.is_fatal());
    }
}
