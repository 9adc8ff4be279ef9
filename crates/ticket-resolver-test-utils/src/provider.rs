use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;
use ticket_resolver_core::{
    AnalysisError, AnalysisProvider, AnalysisResult, MockAnalysisProvider, TicketSubmission,
};
use ticket_resolver_store::SettingsRecord;

/// Wraps a seeded mock provider and records every ticket it sees.
pub struct RecordingProvider {
    inner: MockAnalysisProvider,
    seen: Mutex<Vec<(String, String)>>,
    called_at: Mutex<Vec<Instant>>,
}

impl RecordingProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MockAnalysisProvider::seeded(seed),
            seen: Mutex::new(Vec::new()),
            called_at: Mutex::new(Vec::new()),
        }
    }

    /// `(ticket id, api key)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.seen.lock().clone()
    }

    /// Tokio clock readings taken as each call started.
    pub fn call_times(&self) -> Vec<Instant> {
        self.called_at.lock().clone()
    }
}

#[async_trait]
impl AnalysisProvider for RecordingProvider {
    fn name(&self) -> &str {
        "recording"
    }

    async fn analyze(
        &self,
        ticket: &TicketSubmission,
        settings: &SettingsRecord,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.called_at.lock().push(Instant::now());
        self.seen
            .lock()
            .push((ticket.id.clone(), settings.api_key.clone()));
        self.inner.analyze(ticket, settings).await
    }
}

/// Always fails with the configured error message.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl AnalysisProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn analyze(
        &self,
        _ticket: &TicketSubmission,
        _settings: &SettingsRecord,
    ) -> Result<AnalysisResult, AnalysisError> {
        Err(AnalysisError::AnalysisFailed(self.message.clone()))
    }
}
