//! Analysis providers.

use crate::error::AnalysisError;
use crate::narrative;
use crate::similar::similar_tickets;
use crate::types::{AnalysisResult, Severity, TicketSubmission};
use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ticket_resolver_store::SettingsRecord;

/// Estimated-time buckets drawn uniformly by the mock provider.
pub const ESTIMATED_TIMES: [&str; 5] = ["15 min", "30 min", "1 hour", "2 hours", "4 hours"];

#[async_trait]
/// Produces an analysis for a validated ticket.
///
/// Settings have already passed the API key gate when this is called.
pub trait AnalysisProvider: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Analyze one ticket.
    async fn analyze(
        &self,
        ticket: &TicketSubmission,
        settings: &SettingsRecord,
    ) -> Result<AnalysisResult, AnalysisError>;
}

/// Random parameters plus topic-keyed templates. No inference happens here.
pub struct MockAnalysisProvider {
    rng: Mutex<StdRng>,
}

impl MockAnalysisProvider {
    /// Provider seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Provider with a reproducible random sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn draw(&self) -> Draw {
        let mut rng = self.rng.lock();
        let severity = if rng.random::<f64>() > 0.7 {
            Severity::High
        } else if rng.random::<f64>() > 0.4 {
            Severity::Medium
        } else {
            Severity::Low
        };
        Draw {
            severity,
            priority_rank: rng.random_range(1..=4),
            estimated_time: ESTIMATED_TIMES[rng.random_range(0..ESTIMATED_TIMES.len())],
            confidence: rng.random_range(80..100),
            tag_rank: rng.random_range(1..=4),
        }
    }
}

impl Default for MockAnalysisProvider {
    fn default() -> Self {
        Self::new()
    }
}

struct Draw {
    severity: Severity,
    priority_rank: u8,
    estimated_time: &'static str,
    confidence: u8,
    tag_rank: u8,
}

#[async_trait]
impl AnalysisProvider for MockAnalysisProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(
        &self,
        ticket: &TicketSubmission,
        settings: &SettingsRecord,
    ) -> Result<AnalysisResult, AnalysisError> {
        let draw = self.draw();
        debug!(
            "mock analysis drawn (ticket={}, model={}, severity={}, rank={}, confidence={})",
            ticket.id, settings.model, draw.severity, draw.priority_rank, draw.confidence
        );
        Ok(AnalysisResult {
            severity: draw.severity,
            category: ticket.topic,
            priority_rank: draw.priority_rank,
            estimated_time: draw.estimated_time.to_string(),
            confidence: draw.confidence,
            summary: narrative::summary(ticket),
            root_cause: narrative::root_cause(ticket),
            solution: narrative::solution(ticket),
            steps: narrative::steps(ticket),
            similar_tickets: similar_tickets(ticket.topic),
            tags: vec![
                ticket.topic.as_str().to_string(),
                ticket.department.as_str().to_string(),
                "production".to_string(),
                format!("p{}", draw.tag_rank),
                ticket.priority.as_str().to_string(),
                "stack-trace".to_string(),
                "performance".to_string(),
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisProvider, ESTIMATED_TIMES, MockAnalysisProvider};
    use crate::types::{
        Department, Priority, Severity, TicketStatus, TicketSubmission, TicketType, Topic,
    };
    use pretty_assertions::assert_eq;
    use ticket_resolver_store::SettingsRecord;

    fn ticket(topic: Topic) -> TicketSubmission {
        TicketSubmission {
            id: "TKT-7".to_string(),
            department: Department::Qa,
            title: "Flaky login".to_string(),
            description: "Tokens rejected".to_string(),
            priority: Priority::Medium,
            topic,
            ticket_type: TicketType::Incident,
            status: TicketStatus::Open,
        }
    }

    #[tokio::test]
    async fn random_fields_stay_in_range() {
        let provider = MockAnalysisProvider::seeded(7);
        let settings = SettingsRecord::with_api_key("key");
        for _ in 0..200 {
            let result = provider
                .analyze(&ticket(Topic::Authentication), &settings)
                .await
                .expect("analyze");
            assert!((80..100).contains(&result.confidence));
            assert!((1..=4).contains(&result.priority_rank));
            assert!(ESTIMATED_TIMES.contains(&result.estimated_time.as_str()));
            assert_ne!(result.severity, Severity::Critical);
        }
    }

    #[tokio::test]
    async fn shape_follows_ticket() {
        let provider = MockAnalysisProvider::seeded(1);
        let result = provider
            .analyze(&ticket(Topic::Database), &SettingsRecord::with_api_key("key"))
            .await
            .expect("analyze");
        assert_eq!(result.category, Topic::Database);
        assert_eq!(result.steps.len(), 8);
        assert_eq!(result.similar_tickets.len(), 2);
        assert_eq!(result.tags.len(), 7);
        assert_eq!(&result.tags[..3], &["database", "qa", "production"]);
        assert!(result.tags[3].starts_with('p'));
        assert_eq!(&result.tags[4..], &["medium", "stack-trace", "performance"]);
    }

    #[tokio::test]
    async fn same_seed_same_result() {
        let settings = SettingsRecord::with_api_key("key");
        let first = MockAnalysisProvider::seeded(99)
            .analyze(&ticket(Topic::Api), &settings)
            .await
            .expect("first");
        let second = MockAnalysisProvider::seeded(99)
            .analyze(&ticket(Topic::Api), &settings)
            .await
            .expect("second");
        assert_eq!(first, second);
    }
}
