//! Core services for the ticket resolver demo.
//!
//! This crate owns the ticket and analysis types, the pluggable
//! [`AnalysisProvider`] with its mock implementation, the analysis state
//! machine, local sign-in/sign-up, feedback, and the static dashboard and
//! insights data.
//!
//! Nothing here performs real inference. The analysis is random parameters
//! plus templated narratives keyed by ticket topic.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod feedback;
pub mod insights;
mod narrative;
pub mod notice;
pub mod provider;
pub mod settings;
pub mod similar;
pub mod simulator;
pub mod types;

pub use auth::{AuthService, SignupForm};
pub use error::{AnalysisError, AuthError};
pub use feedback::{Feedback, FeedbackRating, FeedbackSink, LogFeedbackSink};
pub use notice::{Notice, NoticeLevel};
pub use provider::{AnalysisProvider, MockAnalysisProvider};
pub use settings::SettingsService;
pub use simulator::{AnalysisPhase, TicketAnalyzer};
pub use types::{
    AnalysisResult, Department, ParseFieldError, Priority, Severity, SimilarTicket, TicketDraft,
    TicketStatus, TicketSubmission, TicketType, Topic,
};
