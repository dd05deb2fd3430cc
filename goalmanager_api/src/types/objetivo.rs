//! Objetivo: entidade de topo da hierarquia

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::serde_utils::{data_iso, timestamp};
use super::status::StatusObjetivo;
use super::Identificavel;

/// Objetivo como devolvido pelo backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objetivo {
    pub id: String,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub inicio: Option<NaiveDate>,
    #[serde(default, with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub fim: Option<NaiveDate>,
    pub status: StatusObjetivo,
    /// 0-100, calculado pelo backend
    #[serde(default)]
    pub progresso: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Identificavel for Objetivo {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload de criação (entidade sem id e timestamps)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoObjetivo {
    pub titulo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub inicio: Option<NaiveDate>,
    #[serde(with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub fim: Option<NaiveDate>,
    pub status: StatusObjetivo,
    pub progresso: f64,
}

impl NovoObjetivo {
    pub fn new(titulo: impl Into<String>) -> Self {
        Self {
            titulo: titulo.into(),
            descricao: None,
            inicio: None,
            fim: None,
            status: StatusObjetivo::default(),
            progresso: 0.0,
        }
    }
}

/// Atualização parcial: apenas os campos presentes são enviados
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizacaoObjetivo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub inicio: Option<NaiveDate>,
    #[serde(with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub fim: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusObjetivo>,
}

impl AtualizacaoObjetivo {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
