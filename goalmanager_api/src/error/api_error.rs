use thiserror::Error;

/// Erros do cliente da API Goal Manager
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Erro de rede: {0}")]
    Http(#[from] reqwest::Error),

    /// Resposta com status não-2xx (exceto o caminho de renovação do 401)
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Falha definitiva após a renovação do token e a nova tentativa
    #[error("Authentication failed: {status}")]
    Authentication { status: u16 },

    #[error("Falha no login: {0}")]
    Login(String),

    #[error("Erro de serialização: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erro de armazenamento do token: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro de validação: {0}")]
    Validation(String),
}

impl ApiError {
    pub fn login_error(msg: impl Into<String>) -> Self {
        Self::Login(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Status HTTP associado ao erro, quando houver
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::Authentication { status } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

/// Tipo de resultado padrão do crate
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let auth = ApiError::Authentication { status: 401 };
        assert_eq!(auth.to_string(), "Authentication failed: 401");

        let status = ApiError::Status { status: 500, message: "Internal Server Error".to_string() };
        assert_eq!(status.to_string(), "HTTP 500: Internal Server Error");

        let login = ApiError::login_error("credenciais inválidas");
        assert_eq!(login.to_string(), "Falha no login: credenciais inválidas");

        let validation = ApiError::validation_error("Título é obrigatório");
        assert_eq!(validation.to_string(), "Erro de validação: Título é obrigatório");
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(ApiError::Authentication { status: 401 }.status(), Some(401));
        assert_eq!(
            ApiError::Status { status: 404, message: "Not Found".into() }.status(),
            Some(404)
        );
        assert_eq!(ApiError::config_error("x").status(), None);
    }

    #[test]
    fn test_is_authentication() {
        assert!(ApiError::Authentication { status: 401 }.is_authentication());
        assert!(!ApiError::Status { status: 401, message: String::new() }.is_authentication());
    }

    #[test]
    fn test_io_error_from() {
        use std::io::{Error, ErrorKind};
        let err = ApiError::from(Error::new(ErrorKind::PermissionDenied, "negado"));
        assert!(err.to_string().contains("Erro de armazenamento do token"));
    }

    #[test]
    fn test_serialization_error_from() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{invalid json}");
        if let Err(json_error) = parse {
            let err = ApiError::from(json_error);
            assert!(err.to_string().contains("Erro de serialização"));
        }
    }
}
