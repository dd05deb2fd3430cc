//! Ciclo de vida do token de acesso
//!
//! - `initialize_auth`: não faz nada se já houver token; senão faz login e, se falhar,
//!   segue com o token provisório `dev-token-{user_id}` sem retornar erro.
//! - `refresh_token`: apaga o token e faz login de novo, propagando a falha.
//! - `current_token`: token guardado ou, na falta dele, o provisório.

use std::sync::Arc;

use reqwest::Client;

use super::token::{token_preview, TokenStore};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::response::{LoginRequest, LoginResponse};

/// Gerenciador do token de acesso
#[derive(Debug, Clone)]
pub struct TokenManager {
    config: ApiConfig,
    http_client: Client,
    store: Arc<dyn TokenStore>,
}

impl TokenManager {
    pub fn new(config: ApiConfig, http_client: Client, store: Arc<dyn TokenStore>) -> Self {
        Self {
            config,
            http_client,
            store,
        }
    }

    /// Token guardado, se houver. Falhas de leitura contam como ausência.
    pub fn stored_token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("⚠️ [TokenManager] Falha ao ler token armazenado: {}", e);
                None
            }
        }
    }

    pub fn has_token(&self) -> bool {
        self.stored_token().is_some()
    }

    /// Token enviado no header `Authorization`
    pub fn current_token(&self) -> String {
        self.stored_token()
            .unwrap_or_else(|| self.config.placeholder_token())
    }

    /// Apaga o token armazenado
    pub fn clear(&self) -> ApiResult<()> {
        tracing::info!("🗑️ [TokenManager] Token removido");
        self.store.clear()
    }

    /// Login com as credenciais configuradas; guarda e devolve o token obtido
    pub async fn login(&self) -> ApiResult<String> {
        let url = self.config.get_api_url("/auth/login");
        tracing::info!("🔐 [TokenManager] POST {} ({})", url, self.config.login_email);

        let response = self
            .http_client
            .post(&url)
            .json(&LoginRequest {
                email: &self.config.login_email,
                password: &self.config.login_password,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::login_error(format!(
                "Login failed: {} {}",
                status.as_u16(),
                if error_text.is_empty() {
                    status.canonical_reason().unwrap_or("").to_string()
                } else {
                    error_text
                }
            )));
        }

        let body: LoginResponse = serde_json::from_str(&response.text().await?)?;
        let token = body.data.access_token;
        if token.trim().is_empty() {
            return Err(ApiError::login_error("resposta de login sem access_token"));
        }

        self.store.save(&token)?;
        tracing::info!(
            "✅ [TokenManager] Login de {} concluído, token {}",
            body.data.user.email,
            token_preview(&token)
        );

        Ok(token)
    }

    /// Login que nunca falha: em caso de erro devolve o token provisório (sem guardá-lo)
    pub async fn login_or_placeholder(&self) -> String {
        match self.login().await {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("❌ [TokenManager] Erro no login automático: {}", e);
                self.config.placeholder_token()
            }
        }
    }

    /// Garante um token para a sessão; no-op quando já existe um armazenado
    pub async fn initialize_auth(&self) -> String {
        if let Some(token) = self.stored_token() {
            tracing::debug!("[TokenManager] Token já armazenado: {}", token_preview(&token));
            return token;
        }

        self.login_or_placeholder().await
    }

    /// Descarta o token atual e autentica de novo
    pub async fn refresh_token(&self) -> ApiResult<String> {
        self.clear()?;
        self.login().await.map_err(|e| {
            tracing::error!("❌ [TokenManager] Falha na renovação do token: {}", e);
            e
        })
    }
}
