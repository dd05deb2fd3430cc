//! Construtores de entidades para os testes

use chrono::{TimeZone, Utc};
use goalmanager_api::types::{
    Frequencia, Habito, Objetivo, StatusHabito, StatusObjetivo, StatusTarefa, Tarefa,
};
use serde_json::{json, Value};

pub fn objetivo(id: &str, status: StatusObjetivo) -> Objetivo {
    Objetivo {
        id: id.to_string(),
        titulo: format!("Objetivo {}", id),
        descricao: None,
        inicio: None,
        fim: None,
        status,
        progresso: 0.0,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
    }
}

pub fn habito(id: &str, objetivo_id: &str, status: StatusHabito) -> Habito {
    Habito {
        id: id.to_string(),
        objetivo_id: objetivo_id.to_string(),
        titulo: format!("Hábito {}", id),
        descricao: None,
        frequencia: Frequencia::Diario,
        alvo_por_periodo: 1,
        realizados_no_periodo: 0,
        status,
        progresso: 0.0,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
    }
}

pub fn tarefa(id: &str, habito_id: &str, status: StatusTarefa) -> Tarefa {
    Tarefa {
        id: id.to_string(),
        habito_id: habito_id.to_string(),
        titulo: format!("Tarefa {}", id),
        descricao: None,
        prioridade: None,
        status,
        estimativa_horas: None,
        horas_gastas: None,
        prazo: None,
        progresso: 0.0,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap(),
    }
}

/// Tarefa no formato do backend
pub fn tarefa_json(id: &str, habito_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "habitoId": habito_id,
        "titulo": format!("Tarefa {}", id),
        "status": status,
        "progresso": if status == "concluida" { 100 } else { 0 },
        "createdAt": "2025-01-01T10:00:00Z",
        "updatedAt": "2025-01-02T08:30:00Z"
    })
}

pub fn objetivo_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "titulo": format!("Objetivo {}", id),
        "status": status,
        "progresso": 0,
        "createdAt": "2025-01-01T10:00:00Z",
        "updatedAt": "2025-01-01T10:00:00Z"
    })
}

pub fn habito_json(id: &str, objetivo_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "objetivoId": objetivo_id,
        "titulo": format!("Hábito {}", id),
        "frequencia": "diario",
        "alvoPorPeriodo": 3,
        "realizadosNoPeriodo": 0,
        "status": status,
        "progresso": 0,
        "createdAt": "2025-01-01T10:00:00Z",
        "updatedAt": "2025-01-01T10:00:00Z"
    })
}

/// Cliente com token já armazenado apontando para `{base}/api/v1`
pub fn client(server_url: String) -> goalmanager_api::GoalManagerClient {
    use std::sync::Arc;

    goalmanager_api::GoalManagerClient::new(
        goalmanager_api::ApiConfig::with_base_url(server_url),
        Arc::new(goalmanager_api::MemoryTokenStore::with_token("jwt")),
    )
    .unwrap()
}
