use goalmanager_api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    /// Erro de autenticação final (após a única nova tentativa)
    pub fn is_authentication(&self) -> bool {
        matches!(self, AppError::Api(e) if e.is_authentication())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_mantem_mensagem() {
        let err: AppError = ApiError::Status {
            status: 500,
            message: "falha interna".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP 500: falha interna");
        assert!(!err.is_authentication());
    }

    #[test]
    fn test_autenticacao() {
        let err: AppError = ApiError::Authentication { status: 401 }.into();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_validacao() {
        assert_eq!(
            AppError::validation("título obrigatório").to_string(),
            "Validation error: título obrigatório"
        );
    }
}
