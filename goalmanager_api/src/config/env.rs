use std::env;
use std::path::{Path, PathBuf};

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
pub const DEFAULT_LOGIN_EMAIL: &str = "teste@goalmanager.com";
pub const DEFAULT_LOGIN_PASSWORD: &str = "password";
pub const DEFAULT_TOKEN_FILE: &str = ".goalmanager_session";

/// Configuração do cliente da API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub api_base_url: String,
    /// Usado para sintetizar o token provisório quando o login falha
    pub user_id: String,
    pub login_email: String,
    pub login_password: String,
    pub token_file: PathBuf,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            login_email: DEFAULT_LOGIN_EMAIL.to_string(),
            login_password: DEFAULT_LOGIN_PASSWORD.to_string(),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

impl ApiConfig {
    /// Configuração apontando para outra URL base, demais valores padrão
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Carrega a configuração das variáveis `GOALMANAGER_*`
    pub fn from_env() -> ApiResult<Self> {
        // Durante testes as variáveis são definidas diretamente
        if cfg!(not(test)) && Path::new(".env").exists() {
            dotenvy::dotenv()
                .map_err(|e| ApiError::config_error(format!("Erro ao carregar .env: {}", e)))?;
        }

        let defaults = Self::default();

        let config = Self {
            api_base_url: env::var("GOALMANAGER_API_BASE_URL").unwrap_or(defaults.api_base_url),
            user_id: env::var("GOALMANAGER_USER_ID").unwrap_or(defaults.user_id),
            login_email: env::var("GOALMANAGER_LOGIN_EMAIL").unwrap_or(defaults.login_email),
            login_password: env::var("GOALMANAGER_LOGIN_PASSWORD").unwrap_or(defaults.login_password),
            token_file: env::var("GOALMANAGER_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_file),
            timeout_secs: Self::parse_secs("GOALMANAGER_HTTP_TIMEOUT", defaults.timeout_secs)?,
            connect_timeout_secs: Self::parse_secs(
                "GOALMANAGER_HTTP_CONNECT_TIMEOUT",
                defaults.connect_timeout_secs,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_secs(key: &str, default: u64) -> ApiResult<u64> {
        match env::var(key) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ApiError::config_error(format!("{} deve ser um número de segundos", key))),
            Err(_) => Ok(default),
        }
    }

    /// Valida se todas as configurações obrigatórias estão presentes
    pub fn validate(&self) -> ApiResult<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ApiError::config_error(format!(
                "URL base da API inválida: {}",
                self.api_base_url
            )));
        }

        if self.user_id.trim().is_empty() {
            return Err(ApiError::config_error("GOALMANAGER_USER_ID é obrigatório"));
        }

        if self.timeout_secs == 0 {
            return Err(ApiError::config_error("timeout HTTP deve ser maior que zero"));
        }

        Ok(())
    }

    /// Monta a URL completa de um endpoint (`/objetivos` → `{base}/objetivos`)
    pub fn get_api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Token provisório usado quando não há token armazenado
    pub fn placeholder_token(&self) -> String {
        format!("dev-token-{}", self.user_id)
    }
}
