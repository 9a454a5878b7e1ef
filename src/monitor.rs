//! Reachability tracking for the remote-debuggable browser.

use crate::backend::CaptureClient;
use crate::types::BrowserStatus;

/// Tracks whether the debugged browser is reachable through the backend.
///
/// Starts in `Checking` and stays there only until the first probe
/// completes; after that it moves between `Online` and `Offline`. Changing
/// the endpoint resets to `Checking` until the next probe result arrives.
#[derive(Debug, Clone)]
pub struct ReachabilityMonitor {
    endpoint: String,
    status: BrowserStatus,
}

impl ReachabilityMonitor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: BrowserStatus::Checking,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn status(&self) -> BrowserStatus {
        self.status
    }

    /// Whether a capture may be started. Gating is advisory; the session
    /// controller does not enforce it.
    pub fn is_online(&self) -> bool {
        self.status == BrowserStatus::Online
    }

    /// Point the monitor at a different endpoint. A changed endpoint
    /// invalidates the previous result; an unchanged one does not.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        let endpoint = endpoint.into();
        if endpoint != self.endpoint {
            self.endpoint = endpoint;
            self.status = BrowserStatus::Checking;
        }
    }

    /// Record a completed probe result.
    pub fn record(&mut self, status: BrowserStatus) {
        // A completed probe is online or offline; ignore anything else so
        // the monitor never re-enters `Checking` on its own.
        if status != BrowserStatus::Checking {
            self.status = status;
        }
    }

    /// Probe the current endpoint through the backend and record the
    /// outcome. Transport failures count as offline.
    pub async fn refresh(&mut self, client: &CaptureClient) -> BrowserStatus {
        let status = client.probe(&self.endpoint).await;
        self.record(status);
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_checking_until_first_probe() {
        let monitor = ReachabilityMonitor::new("http://127.0.0.1:9222");
        assert_eq!(monitor.status(), BrowserStatus::Checking);
        assert!(!monitor.is_online());
    }

    #[test]
    fn probes_move_between_online_and_offline_without_checking() {
        let mut monitor = ReachabilityMonitor::new("http://127.0.0.1:9222");

        monitor.record(BrowserStatus::Offline);
        assert_eq!(monitor.status(), BrowserStatus::Offline);

        monitor.record(BrowserStatus::Online);
        assert_eq!(monitor.status(), BrowserStatus::Online);
        assert!(monitor.is_online());

        // A stray `Checking` report must not reset a completed state.
        monitor.record(BrowserStatus::Checking);
        assert_eq!(monitor.status(), BrowserStatus::Online);
    }

    #[test]
    fn endpoint_change_resets_to_checking() {
        let mut monitor = ReachabilityMonitor::new("http://127.0.0.1:9222");
        monitor.record(BrowserStatus::Online);

        monitor.set_endpoint("http://127.0.0.1:9223");
        assert_eq!(monitor.status(), BrowserStatus::Checking);
        assert_eq!(monitor.endpoint(), "http://127.0.0.1:9223");
    }

    #[test]
    fn unchanged_endpoint_keeps_the_current_status() {
        let mut monitor = ReachabilityMonitor::new("http://127.0.0.1:9222");
        monitor.record(BrowserStatus::Offline);

        monitor.set_endpoint("http://127.0.0.1:9222");
        assert_eq!(monitor.status(), BrowserStatus::Offline);
    }
}
