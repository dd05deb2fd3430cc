//! Cliente HTTP da API Goal Manager
//!
//! Toda requisição leva `Authorization: Bearer {token}`. Um 401 dispara uma única
//! renovação do token seguida de uma única nova tentativa; qualquer falha dessa
//! nova tentativa vira [`ApiError::Authentication`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::{token_preview, TokenManager, TokenStore};
use crate::client::query::QueryParams;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::response::DeleteManyRequest;
use crate::types::{
    ApiResponse, AtualizacaoHabito, AtualizacaoObjetivo, AtualizacaoTarefa, DashboardData,
    DeleteManyResponse, Habito, HabitoCiclo, HealthStatus, NovaTarefa, NovoHabito, NovoObjetivo,
    Objetivo, RecalculoResponse, StatusTarefa, Tarefa,
};

/// Cliente para a API REST de objetivos, hábitos e tarefas
#[derive(Debug, Clone)]
pub struct GoalManagerClient {
    http_client: Client,
    config: ApiConfig,
    tokens: Arc<TokenManager>,
}

impl GoalManagerClient {
    /// Cria o cliente com timeouts da configuração
    pub fn new(config: ApiConfig, store: Arc<dyn TokenStore>) -> ApiResult<Self> {
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ApiError::config_error(format!("Falha ao criar cliente HTTP: {}", e)))?;

        let tokens = Arc::new(TokenManager::new(config.clone(), http_client.clone(), store));

        Ok(Self {
            http_client,
            config,
            tokens,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub async fn initialize_auth(&self) -> String {
        self.tokens.initialize_auth().await
    }

    pub async fn refresh_token(&self) -> ApiResult<String> {
        self.tokens.refresh_token().await
    }

    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        token: &str,
    ) -> ApiResult<Response> {
        let mut request = self
            .http_client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(token);

        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Envia a requisição aplicando a política de renovação no 401
    async fn execute(&self, method: Method, endpoint: &str, body: Option<Value>) -> ApiResult<Response> {
        let url = self.config.get_api_url(endpoint);
        tracing::debug!("{} {}", method, url);

        let token = self.tokens.current_token();
        let response = self.send_once(&method, &url, body.as_ref(), &token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return self.handle_response(response).await;
        }

        let status = response.status().as_u16();
        tracing::warn!("🔄 Token expirado ({}) em {} {}, tentando renovar...", status, method, endpoint);

        if let Err(e) = self.tokens.clear() {
            tracing::warn!("⚠️ Falha ao remover token antigo: {}", e);
        }
        let novo_token = self.tokens.login_or_placeholder().await;
        tracing::info!("🔄 Tentando requisição novamente com token {}", token_preview(&novo_token));

        match self.send_once(&method, &url, body.as_ref(), &novo_token).await {
            Ok(retry) if retry.status().is_success() => {
                tracing::info!("✅ Requisição bem-sucedida após renovação do token");
                Ok(retry)
            }
            Ok(retry) => {
                tracing::error!(
                    "❌ Nova tentativa de {} {} falhou com HTTP {}",
                    method,
                    endpoint,
                    retry.status().as_u16()
                );
                Err(ApiError::Authentication { status })
            }
            Err(e) => {
                tracing::error!("❌ Falha ao renovar token: {}", e);
                Err(ApiError::Authentication { status })
            }
        }
    }

    /// Processa a resposta HTTP e trata erros
    async fn handle_response(&self, response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let error_body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&error_body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

        tracing::error!("API error ({}): {}", status_code, message);

        Err(ApiError::Status {
            status: status_code,
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let response = self.execute(Method::GET, endpoint, None).await?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: Option<&B>) -> ApiResult<T> {
        let body = body.map(serde_json::to_value).transpose()?;
        let response = self.execute(Method::POST, endpoint, body).await?;
        Self::decode(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> ApiResult<T> {
        let body = serde_json::to_value(body)?;
        let response = self.execute(Method::PUT, endpoint, Some(body)).await?;
        Self::decode(response).await
    }

    async fn delete(&self, endpoint: &str) -> ApiResult<()> {
        self.execute(Method::DELETE, endpoint, None).await?;
        Ok(())
    }

    async fn delete_many(&self, recurso: &str, ids: &[String]) -> ApiResult<DeleteManyResponse> {
        if ids.is_empty() {
            return Err(ApiError::validation_error("nenhum id informado para exclusão"));
        }
        let body = serde_json::to_value(DeleteManyRequest { ids })?;
        let response = self.execute(Method::DELETE, recurso, Some(body)).await?;
        let parsed: Option<DeleteManyResponse> = Self::decode(response).await?;
        Ok(parsed.unwrap_or_default())
    }

    // ==================== UTILITÁRIOS ====================

    /// GET /health
    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.get("/health").await
    }

    /// GET /dashboard
    pub async fn get_dashboard(&self) -> ApiResult<ApiResponse<DashboardData>> {
        self.get("/dashboard").await
    }

    /// POST /recalcular-progressos
    pub async fn recalcular_progressos(&self) -> ApiResult<RecalculoResponse> {
        self.post::<_, Value>("/recalcular-progressos", None).await
    }

    // ==================== OBJETIVOS ====================

    pub async fn get_objetivos(&self, params: &QueryParams) -> ApiResult<ApiResponse<Vec<Objetivo>>> {
        self.get(&format!("/objetivos{}", params.to_query_string())).await
    }

    pub async fn get_objetivo(&self, id: &str) -> ApiResult<ApiResponse<Objetivo>> {
        self.get(&format!("/objetivos/{}", encode(id))).await
    }

    pub async fn create_objetivo(&self, data: &NovoObjetivo) -> ApiResult<ApiResponse<Objetivo>> {
        tracing::info!("➕ Criando objetivo: {}", data.titulo);
        self.post("/objetivos", Some(data)).await
    }

    pub async fn update_objetivo(
        &self,
        id: &str,
        data: &AtualizacaoObjetivo,
    ) -> ApiResult<ApiResponse<Objetivo>> {
        self.put(&format!("/objetivos/{}", encode(id)), data).await
    }

    pub async fn delete_objetivo(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/objetivos/{}", encode(id))).await
    }

    pub async fn delete_objetivos(&self, ids: &[String]) -> ApiResult<DeleteManyResponse> {
        self.delete_many("/objetivos", ids).await
    }

    // ==================== HÁBITOS ====================

    pub async fn get_habitos(&self, params: &QueryParams) -> ApiResult<ApiResponse<Vec<Habito>>> {
        self.get(&format!("/habitos{}", params.to_query_string())).await
    }

    pub async fn get_habitos_by_objetivo(&self, objetivo_id: &str) -> ApiResult<ApiResponse<Vec<Habito>>> {
        self.get(&format!("/objetivos/{}/habitos", encode(objetivo_id))).await
    }

    pub async fn get_habito(&self, id: &str) -> ApiResult<ApiResponse<Habito>> {
        self.get(&format!("/habitos/{}", encode(id))).await
    }

    pub async fn create_habito(&self, data: &NovoHabito) -> ApiResult<ApiResponse<Habito>> {
        tracing::info!("➕ Criando hábito: {}", data.titulo);
        self.post("/habitos", Some(data)).await
    }

    pub async fn update_habito(&self, id: &str, data: &AtualizacaoHabito) -> ApiResult<ApiResponse<Habito>> {
        self.put(&format!("/habitos/{}", encode(id)), data).await
    }

    pub async fn delete_habito(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/habitos/{}", encode(id))).await
    }

    pub async fn delete_habitos(&self, ids: &[String]) -> ApiResult<DeleteManyResponse> {
        self.delete_many("/habitos", ids).await
    }

    /// POST /habitos/{id}/marcar-feito
    pub async fn marcar_habito_feito(&self, id: &str) -> ApiResult<ApiResponse<HabitoCiclo>> {
        self.post::<_, Value>(&format!("/habitos/{}/marcar-feito", encode(id)), None)
            .await
    }

    /// POST /habitos/{id}/reset-ciclo
    pub async fn resetar_habito_ciclo(&self, id: &str) -> ApiResult<ApiResponse<HabitoCiclo>> {
        self.post::<_, Value>(&format!("/habitos/{}/reset-ciclo", encode(id)), None)
            .await
    }

    // ==================== TAREFAS ====================

    pub async fn get_tarefas(&self, params: &QueryParams) -> ApiResult<ApiResponse<Vec<Tarefa>>> {
        self.get(&format!("/tarefas{}", params.to_query_string())).await
    }

    pub async fn get_tarefas_by_objetivo(&self, objetivo_id: &str) -> ApiResult<ApiResponse<Vec<Tarefa>>> {
        self.get(&format!("/objetivos/{}/tarefas", encode(objetivo_id))).await
    }

    /// GET /habitos/{id}/tarefas, com `habitoId` preenchido quando ausente
    pub async fn get_tarefas_by_habito(&self, habito_id: &str) -> ApiResult<ApiResponse<Vec<Tarefa>>> {
        let mut response: ApiResponse<Vec<Tarefa>> =
            self.get(&format!("/habitos/{}/tarefas", encode(habito_id))).await?;
        response.data = response
            .data
            .into_iter()
            .map(|t| t.normalizar(habito_id))
            .collect();
        Ok(response)
    }

    pub async fn get_tarefa(&self, id: &str) -> ApiResult<ApiResponse<Tarefa>> {
        self.get(&format!("/tarefas/{}", encode(id))).await
    }

    pub async fn create_tarefa(&self, data: &NovaTarefa) -> ApiResult<ApiResponse<Tarefa>> {
        tracing::info!("➕ Criando tarefa: {}", data.titulo);
        self.post("/tarefas", Some(data)).await
    }

    pub async fn update_tarefa(&self, id: &str, data: &AtualizacaoTarefa) -> ApiResult<ApiResponse<Tarefa>> {
        self.put(&format!("/tarefas/{}", encode(id)), data).await
    }

    /// PUT /tarefas/{id} contendo apenas o status
    pub async fn update_tarefa_status(&self, id: &str, status: StatusTarefa) -> ApiResult<Tarefa> {
        let response = self
            .update_tarefa(id, &AtualizacaoTarefa::apenas_status(status))
            .await?;
        Ok(response.data)
    }

    pub async fn delete_tarefa(&self, id: &str) -> ApiResult<()> {
        self.delete(&format!("/tarefas/{}", encode(id))).await
    }

    pub async fn delete_tarefas(&self, ids: &[String]) -> ApiResult<DeleteManyResponse> {
        self.delete_many("/tarefas", ids).await
    }
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Extrai a mensagem de um corpo de erro JSON (`error.message`, `message`, `error`)
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let message = json
            .get("error")
            .and_then(|e| e.get("message"))
            .or_else(|| json.get("message"))
            .or_else(|| json.get("error"))
            .and_then(|v| v.as_str());
        if let Some(message) = message {
            return Some(message.to_string());
        }
    }

    Some(body.to_string())
}
