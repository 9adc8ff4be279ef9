//! Test helpers shared across ticket resolver crates.

pub mod feedback;
pub mod fixtures;
pub mod provider;

pub use feedback::RecordingFeedbackSink;
pub use fixtures::{TestStores, sample_ticket};
pub use provider::{FailingProvider, RecordingProvider};
