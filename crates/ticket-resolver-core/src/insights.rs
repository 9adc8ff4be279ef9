//! Static insights panel.

use crate::types::Severity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringIssue {
    pub issue: &'static str,
    pub frequency: u32,
    pub trend: &'static str,
    pub severity: Severity,
    pub avg_resolution: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Critical,
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightCard {
    pub title: &'static str,
    pub description: &'static str,
    pub confidence: u8,
    pub kind: InsightKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentShare {
    pub department: &'static str,
    pub count: u32,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionMetric {
    pub label: &'static str,
    pub value: &'static str,
}

/// Everything the insights tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub top_issues: Vec<RecurringIssue>,
    pub ai_insights: Vec<InsightCard>,
    pub departments: Vec<DepartmentShare>,
    pub resolution: Vec<ResolutionMetric>,
}

impl Insights {
    /// The fixed demo insights, most frequent issue first.
    pub fn demo() -> Self {
        Self {
            top_issues: vec![
                issue("Database Connection Timeout", 34, "+12%", Severity::High, "45 min"),
                issue("Authentication Service Errors", 28, "-8%", Severity::Critical, "23 min"),
                issue("API Rate Limiting Issues", 22, "+5%", Severity::Medium, "67 min"),
                issue("Frontend Build Failures", 19, "-15%", Severity::Low, "34 min"),
                issue("Memory Leak in Production", 16, "+18%", Severity::High, "89 min"),
            ],
            ai_insights: vec![
                InsightCard {
                    title: "Pattern Detection",
                    description: "Identified recurring issue pattern in authentication microservice",
                    confidence: 94,
                    kind: InsightKind::Critical,
                },
                InsightCard {
                    title: "Resolution Optimization",
                    description: "Suggested automation for database timeout issues could reduce MTTR by 40%",
                    confidence: 87,
                    kind: InsightKind::Success,
                },
                InsightCard {
                    title: "Resource Prediction",
                    description: "Expected 23% increase in memory-related tickets next week",
                    confidence: 76,
                    kind: InsightKind::Warning,
                },
                InsightCard {
                    title: "Team Workload",
                    description: "Backend team approaching capacity - consider load balancing",
                    confidence: 91,
                    kind: InsightKind::Info,
                },
            ],
            departments: vec![
                share("Engineering", 45, 32),
                share("DevOps", 38, 27),
                share("QA", 28, 20),
                share("Product", 19, 14),
                share("Design", 10, 7),
            ],
            resolution: vec![
                ResolutionMetric {
                    label: "First Contact Resolution",
                    value: "85%",
                },
                ResolutionMetric {
                    label: "Avg Response Time",
                    value: "2.1h",
                },
                ResolutionMetric {
                    label: "Customer Satisfaction",
                    value: "94%",
                },
            ],
        }
    }
}

fn issue(
    issue: &'static str,
    frequency: u32,
    trend: &'static str,
    severity: Severity,
    avg_resolution: &'static str,
) -> RecurringIssue {
    RecurringIssue {
        issue,
        frequency,
        trend,
        severity,
        avg_resolution,
    }
}

fn share(department: &'static str, count: u32, percentage: u8) -> DepartmentShare {
    DepartmentShare {
        department,
        count,
        percentage,
    }
}
