use std::sync::Arc;
use ticket_resolver_config::ResolverConfig;
use ticket_resolver_core::{
    AnalysisProvider, AuthService, Department, Priority, SettingsService, TicketAnalyzer,
    TicketStatus, TicketSubmission, TicketType, Topic,
};
use ticket_resolver_store::kv::write_json;
use ticket_resolver_store::{
    AccountStore, MemoryStore, SETTINGS_KEY, SettingsRecord, SettingsStore, SharedStore,
};

/// A submitted ticket with the given topic and priority.
pub fn sample_ticket(topic: Topic, priority: Priority) -> TicketSubmission {
    TicketSubmission {
        id: "TKT-1700000000000".to_string(),
        department: Department::Backend,
        title: format!("{topic} alerts firing"),
        description: "Error rate climbing since the last deploy".to_string(),
        priority,
        topic,
        ticket_type: TicketType::Incident,
        status: TicketStatus::Open,
    }
}

/// In-memory stores wired with zero delays.
pub struct TestStores {
    pub kv: Arc<MemoryStore>,
    pub config: ResolverConfig,
}

impl TestStores {
    pub fn new() -> Self {
        Self {
            kv: Arc::new(MemoryStore::new()),
            config: ResolverConfig::without_delays(),
        }
    }

    /// Use `config` instead of the zero-delay defaults.
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn shared(&self) -> SharedStore {
        self.kv.clone()
    }

    pub fn accounts(&self) -> AccountStore {
        AccountStore::new(self.shared())
    }

    pub fn settings_store(&self) -> SettingsStore {
        SettingsStore::new(self.shared())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.accounts(), &self.config.auth)
    }

    pub fn settings(&self) -> SettingsService {
        SettingsService::new(self.settings_store(), &self.config.settings)
    }

    pub fn analyzer(&self, provider: Arc<dyn AnalysisProvider>) -> TicketAnalyzer {
        TicketAnalyzer::new(self.settings_store(), provider, &self.config.analysis)
    }

    /// Persist default settings with `api_key`, bypassing validation.
    pub fn with_api_key(self, api_key: &str) -> Self {
        let record = SettingsRecord::with_api_key(api_key);
        write_json(self.kv.as_ref(), SETTINGS_KEY, &record).expect("seed settings");
        self
    }
}

impl Default for TestStores {
    fn default() -> Self {
        Self::new()
    }
}
