//! Hábito: entidade recorrente, filha de um objetivo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::serde_utils::timestamp;
use super::status::{Frequencia, StatusHabito};
use super::Identificavel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habito {
    pub id: String,
    pub objetivo_id: String,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub frequencia: Frequencia,
    pub alvo_por_periodo: u32,
    #[serde(default)]
    pub realizados_no_periodo: u32,
    pub status: StatusHabito,
    #[serde(default)]
    pub progresso: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Identificavel for Habito {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Habito {
    /// Aplica os contadores devolvidos por `marcar-feito` / `reset-ciclo`
    pub fn aplicar_ciclo(&mut self, ciclo: &HabitoCiclo) {
        self.realizados_no_periodo = ciclo.realizados_no_periodo;
        self.progresso = ciclo.progresso;
        self.updated_at = ciclo.updated_at;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoHabito {
    pub objetivo_id: String,
    pub titulo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub frequencia: Frequencia,
    pub alvo_por_periodo: u32,
    pub realizados_no_periodo: u32,
    pub status: StatusHabito,
    pub progresso: f64,
}

impl NovoHabito {
    pub fn new(objetivo_id: impl Into<String>, titulo: impl Into<String>) -> Self {
        Self {
            objetivo_id: objetivo_id.into(),
            titulo: titulo.into(),
            descricao: None,
            frequencia: Frequencia::default(),
            alvo_por_periodo: 1,
            realizados_no_periodo: 0,
            status: StatusHabito::default(),
            progresso: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizacaoHabito {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objetivo_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencia: Option<Frequencia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alvo_por_periodo: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusHabito>,
}

impl AtualizacaoHabito {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Resposta de `POST /habitos/{id}/marcar-feito` e `/reset-ciclo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitoCiclo {
    pub id: String,
    pub realizados_no_periodo: u32,
    pub progresso: f64,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}
