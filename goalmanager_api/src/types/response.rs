//! Envelopes de resposta e payloads auxiliares da API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_utils::timestamp;

/// Envelope padrão `{ data, pagination? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<ApiPagination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Corpo de erro `{ error: { code, message, details? } }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Vec<ApiErrorField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorField {
    pub field: String,
    pub message: String,
}

/// Resposta de `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub access_token: String,
    pub user: UsuarioAutenticado,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsuarioAutenticado {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Credenciais enviadas ao login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_objetivos: u64,
    pub objetivos_ativos: u64,
    pub total_habitos: u64,
    pub habitos_ativos: u64,
    pub total_tarefas: u64,
    pub tarefas_concluidas: u64,
    pub progresso_geral: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    #[serde(default)]
    pub version: String,
}

/// Resposta das exclusões em lote
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub deleted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculoResponse {
    pub message: String,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Corpo de `DELETE /{recurso}` em lote
#[derive(Debug, Clone, Serialize)]
pub struct DeleteManyRequest<'a> {
    pub ids: &'a [String],
}
