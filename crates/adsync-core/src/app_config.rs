use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub composio_token: String,
    pub spreadsheet_id: String,
    pub env: Environment,
    pub log_level: String,
    /// `None` disables the file log layer.
    pub log_file: Option<PathBuf>,
    pub composio_base_url: String,
    pub ads_entity_id: String,
    pub sheets_entity_id: String,
    pub request_timeout_secs: u64,
    pub campaign_limit: u32,
    pub insights_days: u32,
    pub max_concurrent_campaigns: usize,
    pub clear_range: String,
    pub write_range: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("composio_token", &"[redacted]")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .field("composio_base_url", &self.composio_base_url)
            .field("ads_entity_id", &self.ads_entity_id)
            .field("sheets_entity_id", &self.sheets_entity_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("campaign_limit", &self.campaign_limit)
            .field("insights_days", &self.insights_days)
            .field("max_concurrent_campaigns", &self.max_concurrent_campaigns)
            .field("clear_range", &self.clear_range)
            .field("write_range", &self.write_range)
            .finish()
    }
}
