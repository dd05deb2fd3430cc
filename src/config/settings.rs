use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use goalmanager_api::config::env::{
    DEFAULT_API_BASE_URL, DEFAULT_LOGIN_EMAIL, DEFAULT_LOGIN_PASSWORD, DEFAULT_TOKEN_FILE,
    DEFAULT_USER_ID,
};
use goalmanager_api::ApiConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_id: String,
    pub login_email: String,
    pub login_password: String,
    pub token_file: PathBuf,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Variáveis de ambiente diretas (sem o separador `__`)
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("GOALMANAGER_API_BASE_URL", "api.base_url"),
    ("GOALMANAGER_USER_ID", "api.user_id"),
    ("GOALMANAGER_LOGIN_EMAIL", "api.login_email"),
    ("GOALMANAGER_LOGIN_PASSWORD", "api.login_password"),
    ("GOALMANAGER_TOKEN_FILE", "api.token_file"),
];

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Carrega `{dir}/default`, `{dir}/{RUN_MODE}` e as variáveis `GOALMANAGER_*`
    pub fn load_from(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = Self::run_mode();

        let mut builder = Config::builder()
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.user_id", DEFAULT_USER_ID)?
            .set_default("api.login_email", DEFAULT_LOGIN_EMAIL)?
            .set_default("api.login_password", DEFAULT_LOGIN_PASSWORD)?
            .set_default("api.token_file", DEFAULT_TOKEN_FILE)?
            .set_default("api.timeout_secs", 30_i64)?
            .set_default("api.connect_timeout_secs", 5_i64)?
            .set_default("log.level", "info")?
            // Arquivo de configuração base
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("GOALMANAGER").separator("__"));

        for (var, key) in ENV_OVERRIDES {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_override(*key, value)?;
            }
        }

        let s = builder.build()?;

        s.try_deserialize()
    }

    pub fn run_mode() -> String {
        std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into())
    }

    /// Configuração do cliente HTTP derivada destas settings
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            api_base_url: self.api.base_url.trim_end_matches('/').to_string(),
            user_id: self.api.user_id.clone(),
            login_email: self.api.login_email.clone(),
            login_password: self.api.login_password.clone(),
            token_file: self.api.token_file.clone(),
            timeout_secs: self.api.timeout_secs,
            connect_timeout_secs: self.api.connect_timeout_secs,
        }
    }
}
