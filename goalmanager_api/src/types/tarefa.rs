//! Tarefa: filha obrigatória de um hábito, unidade do kanban

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::serde_utils::{data_iso, numero_flexivel, timestamp};
use super::status::{Prioridade, StatusTarefa};
use super::Identificavel;

/// Progresso fixo de uma tarefa concluída
pub const PROGRESSO_CONCLUIDA: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    pub id: String,
    /// Pode vir vazio em `/habitos/{id}/tarefas`; veja [`Tarefa::normalizar`]
    #[serde(default)]
    pub habito_id: String,
    pub titulo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<Prioridade>,
    pub status: StatusTarefa,
    #[serde(default, with = "numero_flexivel", skip_serializing_if = "Option::is_none")]
    pub estimativa_horas: Option<f64>,
    #[serde(default, with = "numero_flexivel", skip_serializing_if = "Option::is_none")]
    pub horas_gastas: Option<f64>,
    #[serde(default, with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub prazo: Option<NaiveDate>,
    #[serde(default)]
    pub progresso: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Identificavel for Tarefa {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Tarefa {
    /// Garante o vínculo com o hábito pai quando o backend omite `habitoId`
    pub fn normalizar(mut self, habito_id: &str) -> Self {
        if self.habito_id.is_empty() {
            self.habito_id = habito_id.to_string();
        }
        self
    }

    /// Prazo vencido: antes de `hoje` e ainda não concluída
    pub fn esta_atrasada(&self, hoje: NaiveDate) -> bool {
        matches!(self.prazo, Some(prazo) if prazo < hoje) && self.status != StatusTarefa::Concluida
    }

    pub fn esta_concluida(&self) -> bool {
        self.status == StatusTarefa::Concluida
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaTarefa {
    pub habito_id: String,
    pub titulo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<Prioridade>,
    pub status: StatusTarefa,
    #[serde(with = "numero_flexivel", skip_serializing_if = "Option::is_none")]
    pub estimativa_horas: Option<f64>,
    #[serde(with = "numero_flexivel", skip_serializing_if = "Option::is_none")]
    pub horas_gastas: Option<f64>,
    #[serde(with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub prazo: Option<NaiveDate>,
    pub progresso: f64,
}

impl NovaTarefa {
    pub fn new(habito_id: impl Into<String>, titulo: impl Into<String>) -> Self {
        Self {
            habito_id: habito_id.into(),
            titulo: titulo.into(),
            descricao: None,
            prioridade: None,
            status: StatusTarefa::default(),
            estimativa_horas: None,
            horas_gastas: None,
            prazo: None,
            progresso: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizacaoTarefa {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habito_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioridade: Option<Prioridade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusTarefa>,
    #[serde(with = "numero_flexivel", skip_serializing_if = "Option::is_none")]
    pub estimativa_horas: Option<f64>,
    #[serde(with = "numero_flexivel", skip_serializing_if = "Option::is_none")]
    pub horas_gastas: Option<f64>,
    #[serde(with = "data_iso", skip_serializing_if = "Option::is_none")]
    pub prazo: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progresso: Option<f64>,
}

impl AtualizacaoTarefa {
    /// Atualização contendo apenas o status (movimento no kanban)
    pub fn apenas_status(status: StatusTarefa) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiResponse;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tarefa_json() -> serde_json::Value {
        json!({
            "id": "t1",
            "habitoId": "h1",
            "titulo": "Ler capítulo 3",
            "prioridade": "alta",
            "status": "a_fazer",
            "estimativaHoras": "2.5",
            "horasGastas": 1,
            "prazo": "2025-01-10",
            "progresso": 40,
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-02T10:00:00Z"
        })
    }

    #[test]
    fn test_deserializa_tarefa() {
        let t: Tarefa = serde_json::from_value(tarefa_json()).unwrap();
        assert_eq!(t.status, StatusTarefa::AFazer);
        assert_eq!(t.prioridade, Some(Prioridade::Alta));
        assert_eq!(t.estimativa_horas, Some(2.5));
        assert_eq!(t.horas_gastas, Some(1.0));
        assert_eq!(t.prazo, NaiveDate::from_ymd_opt(2025, 1, 10));
        assert!(t.descricao.is_none());
    }

    #[test]
    fn test_lista_com_datas_sem_offset() {
        let mut sem_offset = tarefa_json();
        sem_offset["id"] = json!("t2");
        sem_offset["prazo"] = json!("2025-03-10T00:00:00");
        sem_offset["createdAt"] = json!("2025-01-01T10:00:00");
        sem_offset["updatedAt"] = json!("2025-01-02T10:00:00.250");

        let body = json!({ "data": [tarefa_json(), sem_offset] });
        let resposta: ApiResponse<Vec<Tarefa>> = serde_json::from_value(body).unwrap();

        assert_eq!(resposta.data.len(), 2);
        let t2 = &resposta.data[1];
        assert_eq!(t2.prazo, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(t2.created_at, resposta.data[0].created_at);
        assert_eq!(t2.updated_at.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_normalizar_preenche_habito() {
        let mut v = tarefa_json();
        v.as_object_mut().unwrap().remove("habitoId");
        let t: Tarefa = serde_json::from_value(v).unwrap();
        assert_eq!(t.habito_id, "");
        assert_eq!(t.normalizar("h9").habito_id, "h9");

        let t: Tarefa = serde_json::from_value(tarefa_json()).unwrap();
        assert_eq!(t.normalizar("h9").habito_id, "h1");
    }

    #[test]
    fn test_esta_atrasada() {
        let mut t: Tarefa = serde_json::from_value(tarefa_json()).unwrap();
        let depois = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        let mesmo_dia = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert!(t.esta_atrasada(depois));
        assert!(!t.esta_atrasada(mesmo_dia));

        t.status = StatusTarefa::Concluida;
        assert!(!t.esta_atrasada(depois));

        t.status = StatusTarefa::Fazendo;
        t.prazo = None;
        assert!(!t.esta_atrasada(depois));
    }

    #[test]
    fn test_atualizacao_parcial_envia_apenas_status() {
        let body = serde_json::to_value(AtualizacaoTarefa::apenas_status(StatusTarefa::Fazendo)).unwrap();
        assert_eq!(body, json!({ "status": "fazendo" }));
        assert!(AtualizacaoTarefa::default().is_empty());
    }

    #[test]
    fn test_nova_tarefa_omite_opcionais() {
        let body = serde_json::to_value(NovaTarefa::new("h1", "Correr")).unwrap();
        assert_eq!(
            body,
            json!({ "habitoId": "h1", "titulo": "Correr", "status": "backlog", "progresso": 0.0 })
        );
    }
}
