//! Ticket analysis state machine.
//!
//! A submission walks `Idle → Validating → Waiting → Ready`, or stops at
//! `Failed` when the settings gate rejects it. The settings record is read
//! once per submission. Submitting borrows the analyzer mutably, so a second
//! submission cannot start while one is pending. A submission whose future is
//! dropped while waiting leaves the analyzer `Idle` with no result.

use crate::error::AnalysisError;
use crate::feedback::{Feedback, FeedbackRating};
use crate::provider::AnalysisProvider;
use crate::types::{AnalysisResult, TicketSubmission};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use ticket_resolver_config::AnalysisConfig;
use ticket_resolver_store::{SettingsRecord, SettingsStore};

/// Where the analyzer is in the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPhase {
    Idle,
    Validating,
    Waiting,
    Ready,
    Failed,
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AnalysisPhase::Idle => "idle",
            AnalysisPhase::Validating => "validating",
            AnalysisPhase::Waiting => "waiting",
            AnalysisPhase::Ready => "ready",
            AnalysisPhase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Gates, delays and runs ticket analysis.
pub struct TicketAnalyzer {
    settings: SettingsStore,
    provider: Arc<dyn AnalysisProvider>,
    delay: Duration,
    phase: AnalysisPhase,
    trail: Vec<AnalysisPhase>,
    current: Option<(TicketSubmission, AnalysisResult)>,
}

impl TicketAnalyzer {
    pub fn new(
        settings: SettingsStore,
        provider: Arc<dyn AnalysisProvider>,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            settings,
            provider,
            delay: config.delay(),
            phase: AnalysisPhase::Idle,
            trail: Vec::new(),
            current: None,
        }
    }

    pub fn phase(&self) -> AnalysisPhase {
        self.phase
    }

    /// Phases entered by the latest submission, in order.
    pub fn trail(&self) -> &[AnalysisPhase] {
        &self.trail
    }

    /// Result of the latest successful submission.
    pub fn result(&self) -> Option<&AnalysisResult> {
        self.current.as_ref().map(|(_, result)| result)
    }

    /// Ticket behind the current result.
    pub fn ticket(&self) -> Option<&TicketSubmission> {
        self.current.as_ref().map(|(ticket, _)| ticket)
    }

    /// Feedback is only offered for a ready result.
    pub fn feedback_unlocked(&self) -> bool {
        self.phase == AnalysisPhase::Ready && self.current.is_some()
    }

    /// Run one submission through the state machine.
    ///
    /// Any previous result is discarded first.
    pub async fn submit(
        &mut self,
        ticket: &TicketSubmission,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.trail.clear();
        self.current = None;
        self.enter(AnalysisPhase::Validating);

        let settings = match self.validate() {
            Ok(settings) => settings,
            Err(err) => {
                if err.requires_settings() {
                    self.enter(AnalysisPhase::Failed);
                } else {
                    self.enter(AnalysisPhase::Idle);
                }
                warn!("analysis rejected (ticket={}, reason={})", ticket.id, err);
                return Err(err);
            }
        };

        self.enter(AnalysisPhase::Waiting);
        let in_flight = InFlight {
            phase: &mut self.phase,
            trail: &mut self.trail,
            ticket_id: &ticket.id,
            settled: false,
        };
        if !self.delay.is_zero() {
            debug!(
                "waiting before analysis (ticket={}, delay_ms={})",
                ticket.id,
                self.delay.as_millis()
            );
            tokio::time::sleep(self.delay).await;
        }

        let outcome = self.provider.analyze(ticket, &settings).await;
        match outcome {
            Ok(result) => {
                info!(
                    "analysis complete (ticket={}, provider={}, severity={}, confidence={})",
                    ticket.id,
                    self.provider.name(),
                    result.severity,
                    result.confidence
                );
                self.current = Some((ticket.clone(), result.clone()));
                in_flight.settle(AnalysisPhase::Ready);
                Ok(result)
            }
            Err(err) => {
                warn!(
                    "analysis failed (ticket={}, provider={}, error={})",
                    ticket.id,
                    self.provider.name(),
                    err
                );
                in_flight.settle(AnalysisPhase::Idle);
                Err(match err {
                    AnalysisError::AnalysisFailed(message) => AnalysisError::AnalysisFailed(message),
                    other => AnalysisError::AnalysisFailed(other.to_string()),
                })
            }
        }
    }

    /// Build feedback for the current result, if one is ready.
    pub fn feedback(&self, rating: FeedbackRating, comment: impl Into<String>) -> Option<Feedback> {
        if !self.feedback_unlocked() {
            return None;
        }
        self.ticket()
            .map(|ticket| Feedback::new(ticket.id.clone(), rating, comment))
    }

    /// Drop the current result and return to `Idle`.
    pub fn reset(&mut self) {
        self.current = None;
        self.trail.clear();
        self.phase = AnalysisPhase::Idle;
    }

    fn validate(&self) -> Result<SettingsRecord, AnalysisError> {
        let settings = self
            .settings
            .load()
            .map_err(|err| AnalysisError::AnalysisFailed(err.to_string()))?;
        let Some(settings) = settings else {
            return Err(AnalysisError::ConfigurationMissing);
        };
        if !settings.has_api_key() {
            return Err(AnalysisError::ApiKeyMissing);
        }
        Ok(settings)
    }

    fn enter(&mut self, phase: AnalysisPhase) {
        transition(&mut self.phase, &mut self.trail, phase);
    }
}

fn transition(current: &mut AnalysisPhase, trail: &mut Vec<AnalysisPhase>, next: AnalysisPhase) {
    debug!("analysis phase (from={}, to={})", current, next);
    *current = next;
    trail.push(next);
}

/// Holds the phase while a submission waits on the timer or the provider.
///
/// Dropped without [`InFlight::settle`] means the caller abandoned the
/// submission, and the analyzer falls back to `Idle`.
struct InFlight<'a> {
    phase: &'a mut AnalysisPhase,
    trail: &'a mut Vec<AnalysisPhase>,
    ticket_id: &'a str,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self, phase: AnalysisPhase) {
        transition(self.phase, self.trail, phase);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(
            "analysis abandoned (ticket={}, phase={})",
            self.ticket_id, self.phase
        );
        transition(self.phase, self.trail, AnalysisPhase::Idle);
    }
}
