//! Command-line driver for the ticket resolver demo.

mod cli;
mod output;

use anyhow::Context;
use clap::Parser;
use cli::{AnalyzeArgs, Cli, Command, LoginArgs, SettingsArgs, SettingsCommand, SignupArgs};
use directories::UserDirs;
use log::{debug, info};
use output::Output;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use ticket_resolver_config::{ResolverConfig, StorageBackend};
use ticket_resolver_core::dashboard::Dashboard;
use ticket_resolver_core::insights::Insights;
use ticket_resolver_core::{
    AuthService, FeedbackSink, LogFeedbackSink, MockAnalysisProvider, Notice, SettingsService,
    SignupForm, TicketAnalyzer, TicketDraft,
};
use ticket_resolver_store::{
    AccountStore, FileStore, IntroFlag, MemoryStore, SettingsRecord, SettingsStore, SharedStore,
};

/// Storage directory under the home directory when none is configured.
const DEFAULT_STORAGE_DIR: &str = ".ticket-resolver/storage";

/// Entry point for the ticket resolver CLI.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting ticket-resolver (config_set={}, storage_set={}, json={})",
        cli.config.is_some(),
        cli.storage.is_some(),
        cli.json
    );
    let config = load_config(cli.config.as_deref())?;
    let store = open_store(&config, cli.storage.as_deref())?;
    let output = Output::new(cli.json);

    let ok = match cli.command {
        Command::Signup(args) => signup(&config, &store, &output, args).await,
        Command::Login(args) => login(&config, &store, &output, args).await,
        Command::Settings(command) => settings(&config, &store, &output, command).await,
        Command::Analyze(args) => analyze(&config, &store, &output, args).await,
        Command::Dashboard => {
            output.dashboard(&Dashboard::demo());
            true
        }
        Command::Insights => {
            output.insights(&Insights::demo());
            true
        }
        Command::Intro { dismiss, reset } => {
            let flag = IntroFlag::new(store.clone());
            if dismiss {
                flag.mark_seen().context("failed to store intro flag")?;
            } else if reset {
                flag.reset().context("failed to reset intro flag")?;
            }
            output.intro(flag.seen().context("failed to read intro flag")?);
            true
        }
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ResolverConfig> {
    if let Some(path) = path {
        info!("loading config from path: {}", path.display());
        return ResolverConfig::load_from_path(path).context("failed to load config");
    }
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    debug!("loading layered config from cwd: {}", cwd.display());
    let layered = ResolverConfig::load_layered(&cwd).context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    Ok(layered.config)
}

fn open_store(config: &ResolverConfig, storage: Option<&Path>) -> anyhow::Result<SharedStore> {
    if storage.is_none() && config.storage.backend == StorageBackend::Memory {
        info!("using in-memory storage; nothing will persist");
        return Ok(Arc::new(MemoryStore::new()));
    }
    let root = match (storage, config.storage.path.as_deref()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(path)) => PathBuf::from(path),
        (None, None) => UserDirs::new()
            .map(|dirs| dirs.home_dir().join(DEFAULT_STORAGE_DIR))
            .context("failed to resolve home directory for storage")?,
    };
    let store = FileStore::new(&root)
        .with_context(|| format!("failed to open storage at {}", root.display()))?;
    Ok(Arc::new(store))
}

async fn signup(
    config: &ResolverConfig,
    store: &SharedStore,
    output: &Output,
    args: SignupArgs,
) -> bool {
    let auth = AuthService::new(AccountStore::new(store.clone()), &config.auth);
    let form = SignupForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    };
    match auth.sign_up(&form).await {
        Ok(_) => {
            output.notice(&Notice::account_created());
            true
        }
        Err(err) => {
            output.notice(&Notice::from(&err));
            false
        }
    }
}

async fn login(
    config: &ResolverConfig,
    store: &SharedStore,
    output: &Output,
    args: LoginArgs,
) -> bool {
    let auth = AuthService::new(AccountStore::new(store.clone()), &config.auth);
    match auth.sign_in(&args.email, &args.password).await {
        Ok(account) => {
            output.notice(&Notice::welcome_back(&account));
            true
        }
        Err(err) => {
            output.notice(&Notice::from(&err));
            false
        }
    }
}

async fn settings(
    config: &ResolverConfig,
    store: &SharedStore,
    output: &Output,
    command: SettingsCommand,
) -> bool {
    let service = SettingsService::new(SettingsStore::new(store.clone()), &config.settings);
    let result = match command {
        SettingsCommand::Show => service.load().map(|record| {
            output.settings(record.as_ref());
            None
        }),
        SettingsCommand::Save(args) => match apply_settings(&service, args) {
            Ok(record) => service.save(&record).map(|()| Some(Notice::settings_saved())),
            Err(err) => Err(err),
        },
        SettingsCommand::Test(args) => match apply_settings(&service, args) {
            Ok(record) => service
                .test_connection(&record)
                .await
                .map(|()| Some(Notice::connection_successful())),
            Err(err) => Err(err),
        },
    };
    match result {
        Ok(Some(notice)) => {
            output.notice(&notice);
            true
        }
        Ok(None) => true,
        Err(err) => {
            output.notice(&Notice::from(&err));
            false
        }
    }
}

/// Overlay command-line fields on the stored (or default) settings.
fn apply_settings(
    service: &SettingsService,
    args: SettingsArgs,
) -> Result<SettingsRecord, ticket_resolver_store::SettingsError> {
    let mut record = service.load_or_default()?;
    if let Some(api_key) = args.api_key {
        record.api_key = api_key;
    }
    if let Some(index_name) = args.index_name {
        record.index_name = index_name;
    }
    if let Some(model) = args.model {
        record.model = model;
    }
    if let Some(temperature) = args.temperature {
        record.temperature = temperature;
    }
    if let Some(max_tokens) = args.max_tokens {
        record.max_tokens = max_tokens;
    }
    if let Some(logging) = args.logging {
        record.logging_enabled = logging;
    }
    if let Some(cache) = args.cache {
        record.cache_enabled = cache;
    }
    Ok(record)
}

async fn analyze(
    config: &ResolverConfig,
    store: &SharedStore,
    output: &Output,
    args: AnalyzeArgs,
) -> bool {
    let draft = TicketDraft {
        id: args.id.unwrap_or_default(),
        title: args.title,
        description: args.description,
        topic: args.topic,
        department: args.department,
        priority: args.priority,
        ticket_type: args.ticket_type,
        status: args.status,
    };
    let ticket = match draft.submit() {
        Ok(ticket) => ticket,
        Err(err) => {
            output.notice(&Notice::from(&err));
            return false;
        }
    };

    let mut analyzer = TicketAnalyzer::new(
        SettingsStore::new(store.clone()),
        Arc::new(MockAnalysisProvider::new()),
        &config.analysis,
    );
    let result = match analyzer.submit(&ticket).await {
        Ok(result) => result,
        Err(err) => {
            output.notice(&Notice::from(&err));
            return false;
        }
    };
    output.analysis(&ticket, &result, &Notice::analysis_complete());

    if let Some(rating) = args.feedback {
        match analyzer.feedback(rating, args.comment.unwrap_or_default()) {
            Some(feedback) => {
                LogFeedbackSink.record(&feedback);
                output.notice(&Notice::feedback_received());
            }
            None => output.notice(&Notice::feedback_unavailable()),
        }
    }
    true
}
