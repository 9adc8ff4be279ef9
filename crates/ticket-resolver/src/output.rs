//! Text and JSON rendering for command results.

use serde::Serialize;
use ticket_resolver_core::dashboard::Dashboard;
use ticket_resolver_core::insights::Insights;
use ticket_resolver_core::{AnalysisResult, Notice, NoticeLevel, TicketSubmission};
use ticket_resolver_store::SettingsRecord;

/// Writes to stdout in the selected format.
pub struct Output {
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisView<'a> {
    ticket: &'a TicketSubmission,
    analysis: &'a AnalysisResult,
    notice: &'a Notice,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn notice(&self, notice: &Notice) {
        if self.json {
            self.print_json(notice);
            return;
        }
        let marker = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Destructive => "error",
        };
        println!("[{marker}] {}: {}", notice.title, notice.description);
        if notice.open_settings {
            println!("       run `ticket-resolver settings save --api-key <KEY>` to configure");
        }
    }

    pub fn settings(&self, record: Option<&SettingsRecord>) {
        let masked = record.map(masked_settings);
        if self.json {
            self.print_json(&masked);
            return;
        }
        match masked {
            Some(record) => {
                println!("api key:     {}", record.api_key);
                println!("index:       {}", record.index_name);
                println!("model:       {}", record.model);
                println!("temperature: {}", record.temperature);
                println!("max tokens:  {}", record.max_tokens);
                println!("logging:     {}", record.logging_enabled);
                println!("cache:       {}", record.cache_enabled);
            }
            None => println!("no settings saved"),
        }
    }

    pub fn analysis(&self, ticket: &TicketSubmission, analysis: &AnalysisResult, notice: &Notice) {
        if self.json {
            self.print_json(&AnalysisView {
                ticket,
                analysis,
                notice,
            });
            return;
        }
        println!("{} | {}", ticket.id, ticket.title);
        println!(
            "severity: {}  category: {}  priority: P{}  eta: {}  confidence: {}%",
            analysis.severity,
            analysis.category,
            analysis.priority_rank,
            analysis.estimated_time,
            analysis.confidence
        );
        println!("\n{}\n", analysis.summary);
        println!("{}\n", analysis.root_cause);
        println!("{}\n", analysis.solution);
        println!("IMPLEMENTATION STEPS:");
        for step in &analysis.steps {
            println!("  {step}");
        }
        println!("\nSIMILAR TICKETS:");
        for similar in &analysis.similar_tickets {
            println!(
                "  {} ({}% match) {} [{}]",
                similar.id, similar.similarity, similar.title, similar.status
            );
        }
        println!("\ntags: {}", analysis.tags.join(", "));
        self.notice(notice);
    }

    pub fn dashboard(&self, dashboard: &Dashboard) {
        if self.json {
            self.print_json(dashboard);
            return;
        }
        for metric in &dashboard.metrics {
            println!("{:<32} {:>10} ({})", metric.title, metric.value, metric.change);
        }
        println!("\nDEPARTMENTS:");
        for row in &dashboard.departments {
            println!(
                "  {:<12} {:>4} tickets {:>4} resolved {:>3}%",
                row.name, row.tickets, row.resolved, row.rate
            );
        }
        println!("\nRECENT ACTIVITY:");
        for item in &dashboard.activity {
            println!("  {} {} ({})", item.id, item.action, item.time);
        }
    }

    pub fn insights(&self, insights: &Insights) {
        if self.json {
            self.print_json(insights);
            return;
        }
        println!("TOP ISSUES:");
        for issue in &insights.top_issues {
            println!(
                "  {:<32} {:>3}x {:>5} {:<8} avg {}",
                issue.issue, issue.frequency, issue.trend, issue.severity, issue.avg_resolution
            );
        }
        println!("\nAI INSIGHTS:");
        for card in &insights.ai_insights {
            println!("  {} ({}%): {}", card.title, card.confidence, card.description);
        }
        println!("\nBY DEPARTMENT:");
        for share in &insights.departments {
            println!("  {:<12} {:>3} ({}%)", share.department, share.count, share.percentage);
        }
        println!();
        for metric in &insights.resolution {
            println!("{}: {}", metric.label, metric.value);
        }
    }

    pub fn intro(&self, seen: bool) {
        if self.json {
            self.print_json(&serde_json::json!({ "introSeen": seen }));
        } else if seen {
            println!("intro already seen");
        } else {
            println!("intro not seen yet");
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(err) => log::error!("failed to encode output (error={err})"),
        }
    }
}

/// Copy of `record` with all but the last four key characters hidden.
pub fn masked_settings(record: &SettingsRecord) -> SettingsRecord {
    let visible: String = record
        .api_key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    let hidden = record.api_key.chars().count().saturating_sub(4);
    SettingsRecord {
        api_key: format!("{}{}", "*".repeat(hidden), visible),
        ..record.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::masked_settings;
    use pretty_assertions::assert_eq;
    use ticket_resolver_store::SettingsRecord;

    #[test]
    fn masks_all_but_last_four() {
        let masked = masked_settings(&SettingsRecord::with_api_key("sk-12345678"));
        assert_eq!(masked.api_key, "*******5678");
        assert_eq!(masked_settings(&SettingsRecord::with_api_key("abc")).api_key, "abc");
    }
}
