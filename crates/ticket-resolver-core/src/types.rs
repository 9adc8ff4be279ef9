//! Ticket and analysis data types.

use crate::error::AnalysisError;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A ticket field value that is not one of the known options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field} '{value}'")]
pub struct ParseFieldError {
    pub field: &'static str,
    pub value: String,
}

/// Declares a closed set of ticket field options with their wire names and labels.
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every option in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Lowercase value as stored and interpolated into narratives.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Display label shown in the form.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseFieldError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|option| {
                        option.as_str().eq_ignore_ascii_case(needle)
                            || option.label().eq_ignore_ascii_case(needle)
                    })
                    .ok_or_else(|| ParseFieldError {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }
    };
}

field_enum! {
    /// Technical area a ticket belongs to.
    Topic, "topic" {
        Database => ("database", "Database"),
        Network => ("network", "Network"),
        Authentication => ("authentication", "Authentication"),
        Performance => ("performance", "Performance"),
        Security => ("security", "Security"),
        Api => ("api", "API"),
        Frontend => ("frontend", "Frontend"),
        Backend => ("backend", "Backend"),
        Infrastructure => ("infrastructure", "Infrastructure"),
        Mobile => ("mobile", "Mobile"),
    }
}

field_enum! {
    /// Owning department.
    Department, "department" {
        Engineering => ("engineering", "Engineering"),
        Devops => ("devops", "DevOps"),
        Frontend => ("frontend", "Frontend"),
        Backend => ("backend", "Backend"),
        Qa => ("qa", "QA"),
        Product => ("product", "Product"),
        Design => ("design", "Design"),
        Infrastructure => ("infrastructure", "Infrastructure"),
    }
}

field_enum! {
    /// Submitter-assigned priority.
    Priority, "priority" {
        Critical => ("critical", "Critical"),
        High => ("high", "High"),
        Medium => ("medium", "Medium"),
        Low => ("low", "Low"),
    }
}

field_enum! {
    /// Kind of request.
    TicketType, "type" {
        Incident => ("incident", "Incident"),
        ServiceRequest => ("service request", "Service Request"),
        ChangeRequest => ("change request", "Change Request"),
    }
}

field_enum! {
    /// Lifecycle status carried on a submission.
    TicketStatus, "status" {
        Open => ("open", "Open"),
        InProgress => ("in-progress", "In Progress"),
        Resolved => ("resolved", "Resolved"),
        Closed => ("closed", "Closed"),
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

field_enum! {
    /// Severity assigned by analysis.
    Severity, "severity" {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
        Critical => ("critical", "Critical"),
    }
}

/// Ticket form contents before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDraft {
    /// Leave empty to generate a `TKT-<millis>` id.
    pub id: String,
    pub title: String,
    pub description: String,
    pub topic: Option<Topic>,
    pub department: Option<Department>,
    pub priority: Option<Priority>,
    pub ticket_type: Option<TicketType>,
    pub status: TicketStatus,
}

impl TicketDraft {
    /// Validate required fields and build a submission.
    ///
    /// Every missing field is reported at once, in form order.
    pub fn submit(self) -> Result<TicketSubmission, AnalysisError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.topic.is_none() {
            missing.push("topic");
        }
        if self.department.is_none() {
            missing.push("department");
        }
        if self.priority.is_none() {
            missing.push("priority");
        }
        if self.ticket_type.is_none() {
            missing.push("type");
        }
        let (Some(topic), Some(department), Some(priority), Some(ticket_type)) =
            (self.topic, self.department, self.priority, self.ticket_type)
        else {
            return Err(AnalysisError::MissingInformation(missing));
        };
        if !missing.is_empty() {
            return Err(AnalysisError::MissingInformation(missing));
        }

        let id = if self.id.trim().is_empty() {
            TicketSubmission::generate_id()
        } else {
            self.id.trim().to_string()
        };
        Ok(TicketSubmission {
            id,
            department,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            priority,
            topic,
            ticket_type,
            status: self.status,
        })
    }
}

/// A validated ticket handed to analysis. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSubmission {
    pub id: String,
    pub department: Department,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub topic: Topic,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub status: TicketStatus,
}

impl TicketSubmission {
    /// `TKT-` followed by the current unix time in milliseconds.
    pub fn generate_id() -> String {
        format!("TKT-{}", Utc::now().timestamp_millis())
    }
}

/// A previously resolved ticket shown alongside an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarTicket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub department: String,
    pub status: String,
    pub resolution: String,
    pub resolved_at: String,
    /// Percentage in [0, 100].
    pub similarity: u8,
}

/// Synthesized diagnosis for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub severity: Severity,
    pub category: Topic,
    /// Rank in 1..=4.
    pub priority_rank: u8,
    pub estimated_time: String,
    /// Percentage in [0, 100].
    pub confidence: u8,
    pub summary: String,
    pub root_cause: String,
    pub solution: String,
    pub steps: Vec<String>,
    pub similar_tickets: Vec<SimilarTicket>,
    pub tags: Vec<String>,
}
