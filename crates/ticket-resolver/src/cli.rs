//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use ticket_resolver_core::{
    Department, FeedbackRating, Priority, TicketStatus, TicketType, Topic,
};

/// Simulated AI ticket resolution with local accounts and settings.
#[derive(Debug, Parser)]
#[command(name = "ticket-resolver", version)]
pub struct Cli {
    /// Optional path to a ticket-resolver.json5 config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Directory for the file storage backend
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a local account
    Signup(SignupArgs),
    /// Sign in with a local account
    Login(LoginArgs),
    /// Show, save or test the API settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Submit a ticket for analysis
    Analyze(AnalyzeArgs),
    /// Show the metrics dashboard
    Dashboard,
    /// Show recurring issues and insight cards
    Insights,
    /// Show or reset the intro flag
    Intro {
        /// Mark the intro as seen
        #[arg(long, conflicts_with = "reset")]
        dismiss: bool,
        /// Clear the flag so the intro shows again
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
    /// Password confirmation
    #[arg(long = "confirm", default_value = "")]
    pub confirm_password: String,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the stored settings (api key masked)
    Show,
    /// Validate and overwrite the stored settings
    Save(SettingsArgs),
    /// Run the mock connection test
    Test(SettingsArgs),
}

/// Settings fields; anything omitted keeps the stored or default value.
#[derive(Debug, Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub index_name: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub temperature: Option<f64>,
    #[arg(long)]
    pub max_tokens: Option<u32>,
    #[arg(long)]
    pub logging: Option<bool>,
    #[arg(long)]
    pub cache: Option<bool>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Ticket id; generated when omitted
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub topic: Option<Topic>,
    #[arg(long)]
    pub department: Option<Department>,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long = "type")]
    pub ticket_type: Option<TicketType>,
    #[arg(long, default_value = "open")]
    pub status: TicketStatus,
    /// Rate the result once it is ready
    #[arg(long)]
    pub feedback: Option<FeedbackRating>,
    /// Comment sent along with --feedback
    #[arg(long, requires = "feedback")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, SettingsCommand};
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use ticket_resolver_core::{FeedbackRating, Topic, TicketType};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_analyze_with_labels_and_feedback() {
        let cli = Cli::try_parse_from([
            "ticket-resolver",
            "--json",
            "analyze",
            "--title",
            "Login fails",
            "--description",
            "401 on every request",
            "--topic",
            "authentication",
            "--type",
            "Service Request",
            "--feedback",
            "good",
            "--comment",
            "helpful",
        ])
        .expect("parse");
        assert!(cli.json);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.topic, Some(Topic::Authentication));
        assert_eq!(args.ticket_type, Some(TicketType::ServiceRequest));
        assert_eq!(args.feedback, Some(FeedbackRating::Good));
        assert_eq!(args.department, None);
    }

    #[test]
    fn rejects_unknown_topic() {
        let err = Cli::try_parse_from(["ticket-resolver", "analyze", "--topic", "blockchain"])
            .expect_err("unknown topic");
        assert!(err.to_string().contains("blockchain"));
    }

    #[test]
    fn parses_settings_save() {
        let cli = Cli::try_parse_from([
            "ticket-resolver",
            "settings",
            "save",
            "--api-key",
            "abc",
            "--temperature",
            "0.2",
        ])
        .expect("parse");
        let Command::Settings(SettingsCommand::Save(args)) = cli.command else {
            panic!("expected settings save");
        };
        assert_eq!(args.api_key.as_deref(), Some("abc"));
        assert_eq!(args.temperature, Some(0.2));
    }
}
