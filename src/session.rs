//! Capture session controller: one round at a time.

use std::collections::HashSet;

use crate::backend::CaptureClient;
use crate::error::{QotaError, Result};
use crate::types::{BrowserStatus, CaptureConfig, CaptureResult, CapturedTab, TabListing};

/// Lifecycle of one capture round. `InFlight` is the mutual exclusion: a
/// second capture requested while one is in flight is rejected outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Drives capture rounds against the backend and owns the transient round
/// state: the current result, the last error, and the per-row visited
/// marks. None of this survives into a new round.
#[derive(Debug)]
pub struct CaptureSession {
    client: CaptureClient,
    state: SessionState,
    round: Option<CaptureResult>,
    last_error: Option<String>,
    visited: HashSet<String>,
}

impl CaptureSession {
    pub fn new(client: CaptureClient) -> Self {
        Self {
            client,
            state: SessionState::Idle,
            round: None,
            last_error: None,
            visited: HashSet::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The current round's result, if the last capture succeeded.
    pub fn round(&self) -> Option<&CaptureResult> {
        self.round.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run one capture round. Clears the previous round's view and visited
    /// marks before issuing the request; on a backend failure no partial
    /// result is kept. Not idempotent: a re-invocation performs a fresh
    /// capture and fully replaces the previous round.
    pub async fn capture(
        &mut self,
        devtools_url: &str,
        include_pattern: &str,
        exclude_pattern: &str,
        config: &CaptureConfig,
    ) -> Result<&CaptureResult> {
        self.begin_round()?;
        let outcome = self
            .client
            .capture_tabs(devtools_url, include_pattern, exclude_pattern, config)
            .await;
        self.finish_round(outcome)?;

        // finish_round stored the result on success.
        self.round
            .as_ref()
            .ok_or_else(|| QotaError::Unknown("capture round completed without a result".into()))
    }

    /// Probe reachability of the debugged browser; failures are offline.
    pub async fn probe_reachability(&self, devtools_url: &str) -> BrowserStatus {
        self.client.probe(devtools_url).await
    }

    /// Diagnostic tab listing. Independent of the round lifecycle: it does
    /// not touch the session state, result, or error.
    pub async fn list_open_tabs(&self, devtools_url: &str) -> Result<TabListing> {
        self.client.list_tabs(devtools_url).await
    }

    /// Mark one row of the current round as visited by the operator.
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Abandon the current round: result, error, and visited marks.
    pub fn clear_round(&mut self) {
        self.round = None;
        self.last_error = None;
        self.visited.clear();
        if self.state != SessionState::InFlight {
            self.state = SessionState::Idle;
        }
    }

    /// Consume the current round for accumulation. Merging a round into
    /// the durable set ends it, so the view and visited marks are cleared.
    pub fn take_round(&mut self) -> Option<Vec<CapturedTab>> {
        let tabs = self.round.take().map(|round| round.tabs);
        self.visited.clear();
        if self.state != SessionState::InFlight {
            self.state = SessionState::Idle;
        }
        tabs
    }

    fn begin_round(&mut self) -> Result<()> {
        if self.state == SessionState::InFlight {
            return Err(QotaError::validation(
                "a capture round is already in flight",
            ));
        }
        self.state = SessionState::InFlight;
        self.round = None;
        self.last_error = None;
        self.visited.clear();
        Ok(())
    }

    fn finish_round(&mut self, outcome: Result<CaptureResult>) -> Result<()> {
        match outcome {
            Ok(result) => {
                self.state = SessionState::Succeeded;
                self.round = Some(result);
                Ok(())
            }
            Err(err) => {
                self.state = SessionState::Failed;
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DEFAULT_BACKEND_URL;

    fn session() -> CaptureSession {
        CaptureSession::new(CaptureClient::new(DEFAULT_BACKEND_URL).expect("client"))
    }

    fn round(urls: &[&str]) -> CaptureResult {
        CaptureResult {
            total: urls.len(),
            tabs: urls
                .iter()
                .map(|url| CapturedTab {
                    url: (*url).into(),
                    title: None,
                    product_title: None,
                    upc: None,
                    upc_method: None,
                })
                .collect(),
        }
    }

    #[test]
    fn begin_round_rejects_while_in_flight() {
        let mut s = session();
        s.begin_round().expect("first round starts");
        assert_eq!(s.state(), SessionState::InFlight);

        let err = s.begin_round().expect_err("second round rejected");
        assert!(matches!(err, QotaError::Validation(_)));
        assert_eq!(s.state(), SessionState::InFlight);
    }

    #[test]
    fn begin_round_clears_previous_view_and_visited_marks() {
        let mut s = session();
        s.begin_round().expect("start");
        s.finish_round(Ok(round(&["https://a.example/1"])))
            .expect("finish");
        s.mark_visited("https://a.example/1");

        s.begin_round().expect("restart");
        assert!(s.round().is_none());
        assert!(!s.is_visited("https://a.example/1"));
    }

    #[test]
    fn failed_round_keeps_no_partial_result() {
        let mut s = session();
        s.begin_round().expect("start");
        let err = s
            .finish_round(Err(QotaError::backend(None, "capture failed")))
            .expect_err("failure propagates");
        assert!(matches!(err, QotaError::Backend { .. }));
        assert_eq!(s.state(), SessionState::Failed);
        assert!(s.round().is_none());
        assert_eq!(
            s.last_error(),
            Some("Capture backend error (status: None): capture failed")
        );
    }

    #[test]
    fn new_round_after_failure_starts_clean() {
        let mut s = session();
        s.begin_round().expect("start");
        let _ = s.finish_round(Err(QotaError::backend(None, "boom")));

        s.begin_round().expect("retry allowed after failure");
        assert!(s.last_error().is_none());
        s.finish_round(Ok(round(&["https://a.example/1"])))
            .expect("finish");
        assert_eq!(s.state(), SessionState::Succeeded);
        assert_eq!(s.round().map(|r| r.total), Some(1));
    }

    #[test]
    fn take_round_consumes_view_and_visited_marks() {
        let mut s = session();
        s.begin_round().expect("start");
        s.finish_round(Ok(round(&["https://a.example/1", "https://a.example/2"])))
            .expect("finish");
        s.mark_visited("https://a.example/2");

        let tabs = s.take_round().expect("round present");
        assert_eq!(tabs.len(), 2);
        assert!(s.round().is_none());
        assert!(!s.is_visited("https://a.example/2"));
        assert_eq!(s.state(), SessionState::Idle);

        assert!(s.take_round().is_none());
    }

    #[test]
    fn clear_round_resets_to_idle() {
        let mut s = session();
        s.begin_round().expect("start");
        s.finish_round(Ok(round(&["https://a.example/1"])))
            .expect("finish");

        s.clear_round();
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.round().is_none());
        assert!(s.last_error().is_none());
    }
}
