//! Ações das listas que falam com a API

use goalmanager_api::types::Habito;
use goalmanager_api::GoalManagerClient;

use super::entidade::{EntidadeLista, Recurso};
use super::lista::ListState;
use crate::notify::Notifier;
use crate::utils::logging::{log_api_error, log_batch_deleted};
use crate::utils::{AppError, AppResult};

/// Exclui os itens selecionados via `DELETE /{recurso}`.
///
/// Sucesso: remove exatamente esses ids da lista e limpa a seleção.
/// Falha: a lista fica como estava e um erro é notificado.
pub async fn excluir_selecionados<T: EntidadeLista>(
    lista: &mut ListState<T>,
    client: &GoalManagerClient,
    notifier: &dyn Notifier,
) -> AppResult<usize> {
    let ids = lista.selecionados();
    if ids.is_empty() {
        return Ok(0);
    }

    let resultado = match T::RECURSO {
        Recurso::Objetivos => client.delete_objetivos(&ids).await,
        Recurso::Habitos => client.delete_habitos(&ids).await,
        Recurso::Tarefas => client.delete_tarefas(&ids).await,
    };

    match resultado {
        Ok(_) => {
            let removidos = lista.remove_many(&ids);
            lista.limpar_selecao();
            log_batch_deleted(T::RECURSO.as_str(), removidos);
            notifier.success(&format!("Exclusão em lote concluída: {} {}", removidos, T::RECURSO.as_str()));
            Ok(removidos)
        }
        Err(e) => {
            log_api_error("delete_many", e.status(), &e.to_string());
            notifier.error(&format!("Erro ao excluir {}", T::RECURSO.as_str()));
            Err(e.into())
        }
    }
}

/// POST /habitos/{id}/marcar-feito e aplica os contadores devolvidos
pub async fn marcar_habito_feito(
    lista: &mut ListState<Habito>,
    client: &GoalManagerClient,
    id: &str,
    notifier: &dyn Notifier,
) -> AppResult<()> {
    match client.marcar_habito_feito(id).await {
        Ok(response) => {
            aplicar_ciclo(lista, &response.data)?;
            notifier.success("Hábito marcado como feito!");
            Ok(())
        }
        Err(e) => {
            log_api_error("marcar_habito_feito", e.status(), &e.to_string());
            notifier.error("Erro ao marcar hábito como feito");
            Err(e.into())
        }
    }
}

/// POST /habitos/{id}/reset-ciclo e aplica os contadores devolvidos
pub async fn resetar_habito_ciclo(
    lista: &mut ListState<Habito>,
    client: &GoalManagerClient,
    id: &str,
    notifier: &dyn Notifier,
) -> AppResult<()> {
    match client.resetar_habito_ciclo(id).await {
        Ok(response) => {
            aplicar_ciclo(lista, &response.data)?;
            notifier.success("Ciclo do hábito resetado!");
            Ok(())
        }
        Err(e) => {
            log_api_error("resetar_habito_ciclo", e.status(), &e.to_string());
            notifier.error("Erro ao resetar ciclo do hábito");
            Err(e.into())
        }
    }
}

fn aplicar_ciclo(
    lista: &mut ListState<Habito>,
    ciclo: &goalmanager_api::types::HabitoCiclo,
) -> AppResult<()> {
    let habito = lista
        .get_mut(&ciclo.id)
        .ok_or_else(|| AppError::NotFound(format!("hábito {}", ciclo.id)))?;
    habito.aplicar_ciclo(ciclo);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::views::test_support::{client, habito, tarefa};
    use goalmanager_api::types::{StatusHabito, StatusTarefa, Tarefa};
    use httpmock::prelude::*;
    use serde_json::json;

    fn tarefas() -> ListState<Tarefa> {
        ListState::from_itens(vec![
            tarefa("t1", "h1", StatusTarefa::Backlog),
            tarefa("t2", "h1", StatusTarefa::Fazendo),
            tarefa("t3", "h1", StatusTarefa::Concluida),
        ])
    }

    #[tokio::test]
    async fn test_exclusao_em_lote_remove_exatamente_os_selecionados() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/v1/tarefas")
                    .json_body(json!({ "ids": ["t1", "t3"] }));
                then.status(200)
                    .json_body(json!({ "message": "ok", "deletedCount": 2 }));
            })
            .await;

        let mut lista = tarefas();
        lista.toggle_selecao("t3");
        lista.toggle_selecao("t1");
        let notifier = RecordingNotifier::new();

        let removidos = excluir_selecionados(&mut lista, &client(server.url("/api/v1")), &notifier)
            .await
            .unwrap();

        assert_eq!(removidos, 2);
        assert_eq!(lista.len(), 1);
        assert!(lista.contains("t2"));
        assert!(lista.selecionados().is_empty());
        assert_eq!(notifier.successes(), vec!["Exclusão em lote concluída: 2 tarefas"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exclusao_em_lote_falha_mantem_lista() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/v1/tarefas");
                then.status(500).json_body(json!({ "message": "erro" }));
            })
            .await;

        let mut lista = tarefas();
        lista.toggle_todos();
        let notifier = RecordingNotifier::new();

        let resultado = excluir_selecionados(&mut lista, &client(server.url("/api/v1")), &notifier).await;

        assert!(resultado.is_err());
        assert_eq!(lista.len(), 3);
        assert!(lista.todos_selecionados());
        assert_eq!(notifier.errors(), vec!["Erro ao excluir tarefas"]);
    }

    #[tokio::test]
    async fn test_exclusao_sem_selecao_nao_chama_api() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE);
                then.status(200);
            })
            .await;

        let mut lista = tarefas();
        let notifier = RecordingNotifier::new();
        let removidos = excluir_selecionados(&mut lista, &client(server.url("/api/v1")), &notifier)
            .await
            .unwrap();

        assert_eq!(removidos, 0);
        assert_eq!(mock.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_marcar_feito_aplica_contadores() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/habitos/h1/marcar-feito");
                then.status(200).json_body(json!({
                    "data": {
                        "id": "h1",
                        "realizadosNoPeriodo": 1,
                        "progresso": 33.3,
                        "updatedAt": "2025-03-10T12:00:00Z"
                    }
                }));
            })
            .await;

        let mut lista = ListState::from_itens(vec![habito("h1", "o1", StatusHabito::Ativo)]);
        let notifier = RecordingNotifier::new();
        marcar_habito_feito(&mut lista, &client(server.url("/api/v1")), "h1", &notifier)
            .await
            .unwrap();

        let h = lista.get("h1").unwrap();
        assert_eq!(h.realizados_no_periodo, 1);
        assert_eq!(h.progresso, 33.3);
        assert_eq!(notifier.successes(), vec!["Hábito marcado como feito!"]);
    }

    #[tokio::test]
    async fn test_reset_ciclo_com_erro_notifica() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/v1/habitos/h1/reset-ciclo");
                then.status(404);
            })
            .await;

        let mut habito_feito = habito("h1", "o1", StatusHabito::Ativo);
        habito_feito.realizados_no_periodo = 2;
        let mut lista = ListState::from_itens(vec![habito_feito]);
        let notifier = RecordingNotifier::new();

        let resultado = resetar_habito_ciclo(&mut lista, &client(server.url("/api/v1")), "h1", &notifier).await;

        assert!(resultado.is_err());
        assert_eq!(lista.get("h1").unwrap().realizados_no_periodo, 2);
        assert_eq!(notifier.errors(), vec!["Erro ao resetar ciclo do hábito"]);
    }
}
