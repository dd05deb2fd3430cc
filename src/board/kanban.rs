//! Quadro kanban global de tarefas
//!
//! Mover um card é otimista: o status muda localmente na hora, o PUT leva só
//! `{status}` e, se falhar, o status anterior é restaurado e um erro é notificado.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use goalmanager_api::types::{
    AtualizacaoTarefa, Habito, NovaTarefa, Objetivo, StatusTarefa, Tarefa,
};
use goalmanager_api::{GoalManagerClient, QueryParams};

use crate::notify::Notifier;
use crate::utils::logging::{log_api_error, log_tarefa_move_reverted, log_tarefa_moved};
use crate::utils::{AppError, AppResult};
use crate::views::validacao::{validar_atualizacao_tarefa, validar_nova_tarefa};
use crate::views::{FiltroTarefas, ListState};

/// Resultado de um movimento de card
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Mesmo status: nenhuma requisição
    Inalterada,
    /// Id fora do quadro
    NaoEncontrada,
    /// Servidor confirmou; o card foi reconciliado com o registro devolvido
    Confirmada(Tarefa),
    /// Servidor falhou; o status anterior foi restaurado
    Revertida { anterior: StatusTarefa, erro: String },
}

/// Movimento já aplicado localmente, aguardando o servidor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovimentoPendente {
    pub tarefa_id: String,
    pub anterior: StatusTarefa,
    pub novo: StatusTarefa,
}

/// Uma coluna do quadro
#[derive(Debug)]
pub struct ColunaKanban<'a> {
    pub status: StatusTarefa,
    pub tarefas: Vec<&'a Tarefa>,
}

impl ColunaKanban<'_> {
    pub fn titulo(&self) -> &'static str {
        self.status.label()
    }
}

pub struct KanbanBoard {
    client: GoalManagerClient,
    notifier: Arc<dyn Notifier>,
    tarefas: ListState<Tarefa>,
    objetivos: Vec<Objetivo>,
    habitos: Vec<Habito>,
    pub filtro: FiltroTarefas,
}

impl KanbanBoard {
    pub fn new(client: GoalManagerClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            tarefas: ListState::new(),
            objetivos: Vec::new(),
            habitos: Vec::new(),
            filtro: FiltroTarefas::default(),
        }
    }

    pub fn tarefas(&self) -> &[Tarefa] {
        self.tarefas.itens()
    }

    pub fn tarefa(&self, id: &str) -> Option<&Tarefa> {
        self.tarefas.get(id)
    }

    pub fn objetivos(&self) -> &[Objetivo] {
        &self.objetivos
    }

    pub fn habitos(&self) -> &[Habito] {
        &self.habitos
    }

    pub fn habito(&self, id: &str) -> Option<&Habito> {
        self.habitos.iter().find(|h| h.id == id)
    }

    /// Substitui tarefas, objetivos e hábitos (carregados em paralelo)
    pub async fn carregar(&mut self) -> AppResult<()> {
        let params = QueryParams::new();
        let resultado = tokio::try_join!(
            self.client.get_tarefas(&params),
            self.client.get_objetivos(&params),
            self.client.get_habitos(&params),
        );

        match resultado {
            Ok((tarefas, objetivos, habitos)) => {
                tracing::info!(
                    "📋 Kanban carregado: {} tarefas, {} objetivos, {} hábitos",
                    tarefas.data.len(),
                    objetivos.data.len(),
                    habitos.data.len()
                );
                self.tarefas.replace(tarefas.data);
                self.objetivos = objetivos.data;
                self.habitos = habitos.data;
                Ok(())
            }
            Err(e) => {
                log_api_error("carregar_kanban", e.status(), &e.to_string());
                self.notifier.error("Erro ao carregar dados");
                Err(e.into())
            }
        }
    }

    /// Colunas na ordem do fluxo, com o filtro atual e a data de hoje
    pub fn colunas(&self) -> Vec<ColunaKanban<'_>> {
        self.colunas_em(Local::now().date_naive())
    }

    pub fn colunas_em(&self, hoje: NaiveDate) -> Vec<ColunaKanban<'_>> {
        let filtradas = self.filtro.aplicar(self.tarefas.itens(), hoje);
        StatusTarefa::TODOS
            .iter()
            .map(|status| ColunaKanban {
                status: *status,
                tarefas: filtradas
                    .iter()
                    .copied()
                    .filter(|t| t.status == *status)
                    .collect(),
            })
            .collect()
    }

    // ==================== MOVIMENTO OTIMISTA ====================

    /// Fase local: troca o status no quadro sem falar com o servidor.
    /// `None` quando o id não existe ou o status não muda.
    pub fn aplicar_movimento(&mut self, tarefa_id: &str, novo: StatusTarefa) -> Option<MovimentoPendente> {
        let tarefa = self.tarefas.get_mut(tarefa_id)?;
        if tarefa.status == novo {
            return None;
        }

        let anterior = tarefa.status;
        tarefa.status = novo;
        log_tarefa_moved(tarefa_id, anterior.as_str(), novo.as_str());

        Some(MovimentoPendente {
            tarefa_id: tarefa_id.to_string(),
            anterior,
            novo,
        })
    }

    /// Fase remota: envia `{status}` e reconcilia ou reverte
    pub async fn confirmar_movimento(&mut self, movimento: MovimentoPendente) -> MoveOutcome {
        match self
            .client
            .update_tarefa_status(&movimento.tarefa_id, movimento.novo)
            .await
        {
            Ok(tarefa) => {
                self.tarefas.upsert(tarefa.clone());
                MoveOutcome::Confirmada(tarefa)
            }
            Err(e) => {
                if let Some(tarefa) = self.tarefas.get_mut(&movimento.tarefa_id) {
                    tarefa.status = movimento.anterior;
                }
                log_tarefa_move_reverted(&movimento.tarefa_id, movimento.anterior.as_str(), &e.to_string());
                self.notifier
                    .error("Erro ao atualizar status da tarefa. Movimento revertido.");
                MoveOutcome::Revertida {
                    anterior: movimento.anterior,
                    erro: e.to_string(),
                }
            }
        }
    }

    /// Move um card para outra coluna
    pub async fn mover_tarefa(&mut self, tarefa_id: &str, novo: StatusTarefa) -> MoveOutcome {
        if !self.tarefas.contains(tarefa_id) {
            tracing::debug!("Tarefa {} não está no quadro", tarefa_id);
            return MoveOutcome::NaoEncontrada;
        }

        match self.aplicar_movimento(tarefa_id, novo) {
            Some(movimento) => self.confirmar_movimento(movimento).await,
            None => MoveOutcome::Inalterada,
        }
    }

    // ==================== CRUD NO QUADRO ====================

    pub async fn criar_tarefa(&mut self, mut nova: NovaTarefa) -> AppResult<Tarefa> {
        if let Err(e) = validar_nova_tarefa(&mut nova) {
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        match self.client.create_tarefa(&nova).await {
            Ok(response) => {
                self.tarefas.upsert(response.data.clone());
                self.notifier.success("Tarefa criada com sucesso!");
                Ok(response.data)
            }
            Err(e) => {
                log_api_error("create_tarefa", e.status(), &e.to_string());
                self.notifier.error("Erro ao salvar tarefa");
                Err(e.into())
            }
        }
    }

    pub async fn editar_tarefa(&mut self, id: &str, mut atualizacao: AtualizacaoTarefa) -> AppResult<Tarefa> {
        if !self.tarefas.contains(id) {
            return Err(AppError::NotFound(format!("tarefa {}", id)));
        }
        if let Err(e) = validar_atualizacao_tarefa(&mut atualizacao) {
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        match self.client.update_tarefa(id, &atualizacao).await {
            Ok(response) => {
                self.tarefas.upsert(response.data.clone());
                self.notifier.success("Tarefa atualizada com sucesso!");
                Ok(response.data)
            }
            Err(e) => {
                log_api_error("update_tarefa", e.status(), &e.to_string());
                self.notifier.error("Erro ao salvar tarefa");
                Err(e.into())
            }
        }
    }

    /// Remove o card apenas depois da confirmação do servidor
    pub async fn excluir_tarefa(&mut self, id: &str) -> AppResult<()> {
        match self.client.delete_tarefa(id).await {
            Ok(()) => {
                self.tarefas.remove(id);
                self.notifier.success("Tarefa excluída com sucesso!");
                Ok(())
            }
            Err(e) => {
                log_api_error("delete_tarefa", e.status(), &e.to_string());
                self.notifier.error("Erro ao excluir tarefa");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::views::test_support::{client, habito_json, objetivo_json, tarefa, tarefa_json};
    use crate::views::FiltroPrazo;
    use goalmanager_api::types::Prioridade;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn board(server: &MockServer, tarefas: Vec<Tarefa>) -> (KanbanBoard, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut board = KanbanBoard::new(client(server.url("/api/v1")), notifier.clone());
        board.tarefas.replace(tarefas);
        (board, notifier)
    }

    fn ids_da_coluna(board: &KanbanBoard, status: StatusTarefa) -> Vec<String> {
        board
            .colunas_em(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .into_iter()
            .find(|c| c.status == status)
            .map(|c| c.tarefas.iter().map(|t| t.id.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_mesmo_status_nao_faz_requisicao() {
        let server = MockServer::start_async().await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(200);
            })
            .await;

        let (mut board, notifier) = board(&server, vec![tarefa("t1", "h1", StatusTarefa::Fazendo)]);
        let outcome = board.mover_tarefa("t1", StatusTarefa::Fazendo).await;

        assert_eq!(outcome, MoveOutcome::Inalterada);
        assert_eq!(put.hits_async().await, 0);
        assert!(notifier.all().is_empty());
    }

    #[tokio::test]
    async fn test_id_desconhecido_e_ignorado() {
        let server = MockServer::start_async().await;
        let (mut board, _) = board(&server, vec![tarefa("t1", "h1", StatusTarefa::Backlog)]);

        assert_eq!(
            board.mover_tarefa("zz", StatusTarefa::Fazendo).await,
            MoveOutcome::NaoEncontrada
        );
    }

    #[tokio::test]
    async fn test_movimento_aparece_na_hora_e_reverte_na_falha() {
        let server = MockServer::start_async().await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/v1/tarefas/t1")
                    .json_body(json!({ "status": "fazendo" }));
                then.status(500).json_body(json!({ "message": "indisponível" }));
            })
            .await;

        let (mut board, notifier) = board(&server, vec![tarefa("t1", "h1", StatusTarefa::AFazer)]);

        let pendente = board.aplicar_movimento("t1", StatusTarefa::Fazendo).unwrap();
        assert_eq!(ids_da_coluna(&board, StatusTarefa::Fazendo), vec!["t1"]);
        assert!(ids_da_coluna(&board, StatusTarefa::AFazer).is_empty());

        let outcome = board.confirmar_movimento(pendente).await;

        assert!(matches!(outcome, MoveOutcome::Revertida { anterior: StatusTarefa::AFazer, .. }));
        assert_eq!(ids_da_coluna(&board, StatusTarefa::AFazer), vec!["t1"]);
        assert!(ids_da_coluna(&board, StatusTarefa::Fazendo).is_empty());
        assert_eq!(
            notifier.errors(),
            vec!["Erro ao atualizar status da tarefa. Movimento revertido."]
        );
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_sucesso_reconcilia_com_servidor() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/v1/tarefas/t1")
                    .json_body(json!({ "status": "concluida" }));
                then.status(200)
                    .json_body(json!({ "data": tarefa_json("t1", "h1", "concluida") }));
            })
            .await;

        let (mut board, notifier) = board(&server, vec![tarefa("t1", "h1", StatusTarefa::Fazendo)]);
        let outcome = board.mover_tarefa("t1", StatusTarefa::Concluida).await;

        let MoveOutcome::Confirmada(tarefa) = outcome else {
            panic!("movimento deveria ser confirmado");
        };
        assert_eq!(tarefa.progresso, 100.0);
        assert_eq!(board.tarefa("t1").unwrap().progresso, 100.0);
        assert_eq!(ids_da_coluna(&board, StatusTarefa::Concluida), vec!["t1"]);
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_carregar_substitui_estado() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/tarefas");
                then.status(200).json_body(json!({
                    "data": [tarefa_json("n1", "h1", "backlog"), tarefa_json("n2", "h1", "bloqueada")]
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/objetivos");
                then.status(200).json_body(json!({ "data": [objetivo_json("o1", "em_andamento")] }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/habitos");
                then.status(200).json_body(json!({ "data": [habito_json("h1", "o1", "ativo")] }));
            })
            .await;

        let (mut board, _) = board(&server, vec![tarefa("velha", "h1", StatusTarefa::Backlog)]);
        board.carregar().await.unwrap();

        assert_eq!(board.tarefas().len(), 2);
        assert!(board.tarefa("velha").is_none());
        assert_eq!(board.objetivos().len(), 1);
        assert_eq!(board.habito("h1").unwrap().alvo_por_periodo, 3);
        assert_eq!(ids_da_coluna(&board, StatusTarefa::Bloqueada), vec!["n2"]);
    }

    #[tokio::test]
    async fn test_carregar_com_falha_notifica_e_mantem_estado() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/v1/tarefas");
                then.status(500);
            })
            .await;
        for path in ["/api/v1/objetivos", "/api/v1/habitos"] {
            server
                .mock_async(move |when, then| {
                    when.method(GET).path(path);
                    then.status(200).json_body(json!({ "data": [] }));
                })
                .await;
        }

        let (mut board, notifier) = board(&server, vec![tarefa("t1", "h1", StatusTarefa::Backlog)]);
        assert!(board.carregar().await.is_err());

        assert_eq!(board.tarefas().len(), 1);
        assert_eq!(notifier.errors(), vec!["Erro ao carregar dados"]);
    }

    #[tokio::test]
    async fn test_colunas_na_ordem_com_filtro() {
        let server = MockServer::start_async().await;
        let mut alta = tarefa("t1", "h1", StatusTarefa::Backlog);
        alta.prioridade = Some(Prioridade::Alta);
        alta.prazo = NaiveDate::from_ymd_opt(2025, 3, 1);
        let baixa = tarefa("t2", "h1", StatusTarefa::Backlog);
        let (mut board, _) = board(&server, vec![alta, baixa]);

        let titulos: Vec<&str> = board
            .colunas_em(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .iter()
            .map(|c| c.titulo())
            .collect();
        assert_eq!(titulos, vec!["Backlog", "A Fazer", "Fazendo", "Bloqueada", "Concluída"]);
        assert_eq!(ids_da_coluna(&board, StatusTarefa::Backlog), vec!["t1", "t2"]);

        board.filtro.prazo = Some(FiltroPrazo::Atrasado);
        assert_eq!(ids_da_coluna(&board, StatusTarefa::Backlog), vec!["t1"]);
    }

    #[tokio::test]
    async fn test_criar_editar_excluir() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/v1/tarefas")
                    .json_body_partial(r#"{ "habitoId": "h1", "titulo": "Nova" }"#);
                then.status(201).json_body(json!({ "data": tarefa_json("t9", "h1", "backlog") }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/v1/tarefas/t9")
                    .json_body(json!({ "status": "concluida", "progresso": 100.0 }));
                then.status(200).json_body(json!({ "data": tarefa_json("t9", "h1", "concluida") }));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/v1/tarefas/t9");
                then.status(204);
            })
            .await;

        let (mut board, notifier) = board(&server, vec![]);

        board.criar_tarefa(NovaTarefa::new("h1", " Nova ")).await.unwrap();
        assert!(board.tarefa("t9").is_some());

        board
            .editar_tarefa("t9", AtualizacaoTarefa::apenas_status(StatusTarefa::Concluida))
            .await
            .unwrap();
        assert_eq!(board.tarefa("t9").unwrap().status, StatusTarefa::Concluida);

        board.excluir_tarefa("t9").await.unwrap();
        assert!(board.tarefas().is_empty());
        delete.assert_async().await;

        assert_eq!(
            notifier.successes(),
            vec![
                "Tarefa criada com sucesso!",
                "Tarefa atualizada com sucesso!",
                "Tarefa excluída com sucesso!"
            ]
        );
    }

    #[tokio::test]
    async fn test_excluir_com_falha_mantem_card() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/v1/tarefas/t1");
                then.status(500);
            })
            .await;

        let (mut board, notifier) = board(&server, vec![tarefa("t1", "h1", StatusTarefa::Backlog)]);
        assert!(board.excluir_tarefa("t1").await.is_err());

        assert!(board.tarefa("t1").is_some());
        assert_eq!(notifier.errors(), vec!["Erro ao excluir tarefa"]);
    }

    #[tokio::test]
    async fn test_criar_sem_titulo_nao_chama_api() {
        let server = MockServer::start_async().await;
        let post = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(201);
            })
            .await;

        let (mut board, notifier) = board(&server, vec![]);
        assert!(board.criar_tarefa(NovaTarefa::new("h1", "  ")).await.is_err());

        assert_eq!(post.hits_async().await, 0);
        assert_eq!(notifier.errors(), vec!["Validation error: Título é obrigatório"]);
    }
}
