//! Post-analysis feedback.

use crate::types::ParseFieldError;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Satisfaction rating picked in the feedback widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    Excellent,
    Good,
    Satisfactory,
    Sufficient,
    Poor,
}

impl FeedbackRating {
    /// Ratings from best to worst.
    pub const ALL: [FeedbackRating; 5] = [
        FeedbackRating::Excellent,
        FeedbackRating::Good,
        FeedbackRating::Satisfactory,
        FeedbackRating::Sufficient,
        FeedbackRating::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackRating::Excellent => "excellent",
            FeedbackRating::Good => "good",
            FeedbackRating::Satisfactory => "satisfactory",
            FeedbackRating::Sufficient => "sufficient",
            FeedbackRating::Poor => "poor",
        }
    }

    /// Satisfaction score from 5 (excellent) down to 1 (poor).
    pub fn score(&self) -> u8 {
        match self {
            FeedbackRating::Excellent => 5,
            FeedbackRating::Good => 4,
            FeedbackRating::Satisfactory => 3,
            FeedbackRating::Sufficient => 2,
            FeedbackRating::Poor => 1,
        }
    }
}

impl fmt::Display for FeedbackRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FeedbackRating {
    type Err = ParseFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|rating| rating.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseFieldError {
                field: "rating",
                value: value.to_string(),
            })
    }
}

/// Feedback on one analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub ticket_id: String,
    pub rating: FeedbackRating,
    pub comment: String,
    pub satisfaction: u8,
}

impl Feedback {
    pub fn new(ticket_id: impl Into<String>, rating: FeedbackRating, comment: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            rating,
            comment: comment.into(),
            satisfaction: rating.score(),
        }
    }
}

/// Destination for submitted feedback.
pub trait FeedbackSink: Send + Sync {
    fn record(&self, feedback: &Feedback);
}

/// Writes feedback to the log and nowhere else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedbackSink;

impl FeedbackSink for LogFeedbackSink {
    fn record(&self, feedback: &Feedback) {
        info!(
            "feedback submitted (ticket={}, rating={}, satisfaction={}, comment_len={})",
            feedback.ticket_id,
            feedback.rating,
            feedback.satisfaction,
            feedback.comment.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{Feedback, FeedbackRating};
    use pretty_assertions::assert_eq;

    #[test]
    fn scores_descend_from_excellent() {
        let scores: Vec<u8> = FeedbackRating::ALL.iter().map(FeedbackRating::score).collect();
        assert_eq!(scores, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn feedback_carries_satisfaction_score() {
        let feedback = Feedback::new("TKT-1", FeedbackRating::Sufficient, "ok-ish");
        assert_eq!(feedback.satisfaction, 2);
        let json = serde_json::to_value(&feedback).expect("json");
        assert_eq!(json["rating"], "sufficient");
        assert_eq!(json["ticketId"], "TKT-1");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(
            "Excellent".parse::<FeedbackRating>().expect("parse"),
            FeedbackRating::Excellent
        );
        assert!("meh".parse::<FeedbackRating>().is_err());
    }
}
