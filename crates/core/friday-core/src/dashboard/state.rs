//! Dashboard UI state and the submission state machine
//!
//! A submission moves `Idle -> Submitting -> Settled -> Idle`. Settling is
//! immediate, so only `Idle` and `Submitting` are observable. The split
//! between [`DashboardState::begin_submission`] and
//! [`DashboardState::complete_submission`] lets a caller that shares the state
//! behind a lock release it while the persona calls are in flight.

use super::panel::PersonaPanel;
use crate::error::PersonaError;
use crate::types::{CombinedResponse, HistoryEntry, HistoryLog};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Observable phase of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Ready for a new submission
    Idle,
    /// A submission is in flight; new ones are rejected
    Submitting,
}

/// Why a submit attempt did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Query was empty after trimming
    EmptyQuery,
    /// Another submission is still in flight
    AlreadySubmitting,
}

/// Result of one submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing happened: no network call, no state change
    Ignored(IgnoreReason),
    /// Every persona answered; the combined response is now visible
    Succeeded(CombinedResponse),
    /// A persona call failed; its message is now the visible error
    Failed(PersonaError),
}

/// Token for a submission that has started and must be completed
#[derive(Debug)]
#[must_use = "a started submission leaves the dashboard loading until completed"]
pub struct PendingSubmission {
    query: String,
    started_at: Instant,
}

impl PendingSubmission {
    /// Query to send, untrimmed
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Everything the dashboard view renders
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    query: String,
    response: Option<CombinedResponse>,
    error: Option<String>,
    is_loading: bool,
    history: HistoryLog,
}

impl DashboardState {
    /// Fresh, idle dashboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text in the query field
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Current query field text
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Last successful combined response
    pub fn response(&self) -> Option<&CombinedResponse> {
        self.response.as_ref()
    }

    /// Visible error banner text
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submission is in flight (submit control disabled)
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Session history
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Current phase
    pub fn phase(&self) -> SubmissionPhase {
        if self.is_loading {
            SubmissionPhase::Submitting
        } else {
            SubmissionPhase::Idle
        }
    }

    /// Start a submission for the current query.
    ///
    /// Leaves the state untouched when the trimmed query is empty or a
    /// submission is already in flight.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, IgnoreReason> {
        if self.is_loading {
            debug!("submission ignored: another one is in flight");
            return Err(IgnoreReason::AlreadySubmitting);
        }
        if self.query.trim().is_empty() {
            return Err(IgnoreReason::EmptyQuery);
        }

        self.error = None;
        self.is_loading = true;
        Ok(PendingSubmission {
            query: self.query.clone(),
            started_at: Instant::now(),
        })
    }

    /// Settle a started submission with the persona results.
    ///
    /// Success records a history entry and replaces the visible response;
    /// failure only sets the error banner. Either way loading ends and the
    /// query field is cleared.
    pub fn complete_submission(
        &mut self,
        pending: PendingSubmission,
        result: Result<CombinedResponse, PersonaError>,
    ) -> SubmitOutcome {
        let elapsed_ms = pending.started_at.elapsed().as_millis();
        self.is_loading = false;
        self.query.clear();

        match result {
            Ok(combined) => {
                info!(
                    "submission succeeded in {}ms (history={})",
                    elapsed_ms,
                    self.history.len() + 1
                );
                self.history
                    .prepend(HistoryEntry::now(pending.query, combined.clone()));
                self.response = Some(combined.clone());
                SubmitOutcome::Succeeded(combined)
            }
            Err(err) => {
                warn!("submission failed in {}ms: {}", elapsed_ms, err);
                self.error = Some(err.to_string());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Run a whole submission against `panel` while owning the state
    pub async fn submit(&mut self, panel: &PersonaPanel) -> SubmitOutcome {
        let pending = match self.begin_submission() {
            Ok(p) => p,
            Err(reason) => return SubmitOutcome::Ignored(reason),
        };
        let result = panel.gather(pending.query()).await;
        self.complete_submission(pending, result)
    }
}
