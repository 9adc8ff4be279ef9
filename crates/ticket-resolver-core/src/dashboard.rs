//! Static metrics dashboard.

use serde::Serialize;

/// Direction of a metric's change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentLoad {
    pub name: &'static str,
    pub tickets: u32,
    pub resolved: u32,
    /// Resolution rate in percent.
    pub rate: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: &'static str,
    pub action: &'static str,
    pub time: &'static str,
    pub kind: ActivityKind,
}

/// Everything the dashboard tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub metrics: Vec<Metric>,
    pub departments: Vec<DepartmentLoad>,
    pub activity: Vec<Activity>,
}

impl Dashboard {
    /// The fixed demo dashboard.
    pub fn demo() -> Self {
        Self {
            metrics: vec![
                metric("MTTR (Mean Time to Resolution)", "2.4 hours", "-15%", Trend::Down),
                metric("Resolved Tickets", "1,247", "+23%", Trend::Up),
                metric("Auto-Resolve Rate", "78%", "+12%", Trend::Up),
                metric("CSAT Score", "4.8/5", "+0.3", Trend::Up),
            ],
            departments: vec![
                department("Engineering", 145, 132, 91),
                department("DevOps", 89, 85, 96),
                department("Frontend", 67, 58, 87),
                department("Backend", 123, 109, 89),
                department("QA", 45, 42, 93),
            ],
            activity: vec![
                activity("TKT-2024-156", "AI Analysis Complete", "2 min ago", ActivityKind::Success),
                activity("TKT-2024-157", "Similarity Match Found", "5 min ago", ActivityKind::Info),
                activity("TKT-2024-158", "Auto-Resolved", "7 min ago", ActivityKind::Success),
                activity("TKT-2024-159", "Manual Review Required", "12 min ago", ActivityKind::Warning),
            ],
        }
    }
}

fn metric(title: &'static str, value: &'static str, change: &'static str, trend: Trend) -> Metric {
    Metric {
        title,
        value,
        change,
        trend,
    }
}

fn department(name: &'static str, tickets: u32, resolved: u32, rate: u8) -> DepartmentLoad {
    DepartmentLoad {
        name,
        tickets,
        resolved,
        rate,
    }
}

fn activity(
    id: &'static str,
    action: &'static str,
    time: &'static str,
    kind: ActivityKind,
) -> Activity {
    Activity {
        id,
        action,
        time,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, Trend};
    use pretty_assertions::assert_eq;

    #[test]
    fn only_mttr_trends_down() {
        let dashboard = Dashboard::demo();
        let down: Vec<&str> = dashboard
            .metrics
            .iter()
            .filter(|metric| metric.trend == Trend::Down)
            .map(|metric| metric.title)
            .collect();
        assert_eq!(down, vec!["MTTR (Mean Time to Resolution)"]);
    }

    #[test]
    fn department_rows_never_resolve_more_than_received() {
        for row in Dashboard::demo().departments {
            assert!(row.resolved <= row.tickets, "{}", row.name);
        }
    }
}
