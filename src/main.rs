//! goalmanager: linha de comando para objetivos, hábitos, tarefas e o quadro kanban
//!
//! Toda saída é um `CliResponse { success, data, error }`; falhas de rede viram
//! `success: false` e código de saída 1.

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use tokio::time::Instant;

use goalmanager::api::auth::token_preview;
use goalmanager::api::types::serde_utils::data_iso::parse_data;
use goalmanager::api::types::{
    AtualizacaoHabito, AtualizacaoObjetivo, AtualizacaoTarefa, Frequencia, NovaTarefa, NovoHabito,
    NovoObjetivo, Prioridade, StatusHabito, StatusObjetivo, StatusTarefa, Tarefa,
};
use goalmanager::api::{
    Direcao, FileTokenStore, GoalManagerClient, MemoryTokenStore, QueryParams, TokenStore,
};
use goalmanager::board::{KanbanBoard, MoveOutcome};
use goalmanager::config::Settings;
use goalmanager::notify::{ConsoleNotifier, Notifier};
use goalmanager::utils::logging::*;
use goalmanager::utils::truncate_with_suffix;
use goalmanager::views::validacao::*;
use goalmanager::views::{
    marcar_habito_feito, resetar_habito_ciclo, CampoOrdenacao, EntidadeLista, FiltroLista,
    FiltroPrazo, FiltroTarefas, ListState, Ordenacao,
};

/// Tamanho máximo do título de um card no kanban
const TITULO_CARD_MAX: usize = 40;

/// Goal Manager CLI - objetivos, hábitos e tarefas
#[derive(Parser)]
#[command(name = "goalmanager")]
#[command(version)]
#[command(about = "CLI para a API do Goal Manager", long_about = None)]
struct Cli {
    /// URL base da API (sobrepõe a configuração)
    #[arg(long, env = "GOALMANAGER_API_BASE_URL", global = true)]
    api_url: Option<String>,

    /// Formato de saída (json, pretty)
    #[arg(short = 'o', long, default_value = "pretty", global = true)]
    output: OutputFormat,

    /// Modo verbose para debug
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Mantém o token apenas em memória
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Comando a executar
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, PartialEq)]
enum OutputFormat {
    Json,
    Pretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(format!("Formato desconhecido: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Token de acesso
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },

    /// Verifica a saúde da API
    Health,

    /// Resumo geral (totais e progresso)
    Dashboard,

    /// Recalcula o progresso de todos os objetivos e hábitos
    Recalcular,

    /// Objetivos
    Objetivos {
        #[command(subcommand)]
        action: ObjetivoCommands,
    },

    /// Hábitos
    Habitos {
        #[command(subcommand)]
        action: HabitoCommands,
    },

    /// Tarefas
    Tarefas {
        #[command(subcommand)]
        action: TarefaCommands,
    },

    /// Quadro kanban global de tarefas
    Kanban {
        #[command(subcommand)]
        action: KanbanCommands,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Faz login se ainda não houver token (usa token provisório se falhar)
    Init,
    /// Descarta o token e faz login novamente
    Refresh,
    /// Mostra o token armazenado
    Status,
}

/// Parâmetros comuns das listagens
#[derive(Args, Clone, Default)]
struct ListArgs {
    /// Busca em título e descrição
    #[arg(short = 'b', long)]
    busca: Option<String>,

    /// Filtra por status (repetível)
    #[arg(short = 's', long)]
    status: Vec<String>,

    /// Campo de ordenação (titulo, status, progresso, prazo, createdAt)
    #[arg(long)]
    order_by: Option<CampoOrdenacao>,

    /// Direção da ordenação (asc, desc)
    #[arg(long, default_value = "asc")]
    order_dir: Direcao,

    /// Página
    #[arg(long)]
    page: Option<u32>,

    /// Itens por página
    #[arg(long)]
    limit: Option<u32>,
}

impl ListArgs {
    fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.busca = self.busca.clone();
        params.status = self.status.clone();
        params.page = self.page;
        params.limit = self.limit;
        if let Some(campo) = self.order_by {
            params = params.ordenar(campo.as_str(), self.order_dir);
        }
        params
    }

    fn filtro(&self) -> FiltroLista {
        FiltroLista {
            busca: self.busca.clone().unwrap_or_default(),
            status: self.status.clone(),
        }
    }

    fn ordenacao(&self) -> Option<Ordenacao> {
        self.order_by.map(|campo| Ordenacao::new(campo, self.order_dir))
    }
}

#[derive(Subcommand)]
enum ObjetivoCommands {
    /// Lista objetivos
    List(ListArgs),
    /// Detalhes de um objetivo
    Get { id: String },
    /// Cria um objetivo
    Create {
        #[arg(short = 't', long)]
        titulo: String,
        #[arg(short = 'd', long)]
        descricao: Option<String>,
        /// Data de início (YYYY-MM-DD)
        #[arg(long, value_parser = parse_data_arg)]
        inicio: Option<NaiveDate>,
        /// Data de fim (YYYY-MM-DD)
        #[arg(long, value_parser = parse_data_arg)]
        fim: Option<NaiveDate>,
        #[arg(short = 's', long)]
        status: Option<StatusObjetivo>,
    },
    /// Atualiza apenas os campos informados
    Update {
        id: String,
        #[arg(short = 't', long)]
        titulo: Option<String>,
        #[arg(short = 'd', long)]
        descricao: Option<String>,
        #[arg(long, value_parser = parse_data_arg)]
        inicio: Option<NaiveDate>,
        #[arg(long, value_parser = parse_data_arg)]
        fim: Option<NaiveDate>,
        #[arg(short = 's', long)]
        status: Option<StatusObjetivo>,
    },
    /// Exclui um ou vários objetivos
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Hábitos de um objetivo
    Habitos { id: String },
    /// Tarefas de um objetivo
    Tarefas { id: String },
}

#[derive(Subcommand)]
enum HabitoCommands {
    /// Lista hábitos
    List {
        #[command(flatten)]
        args: ListArgs,
        /// Apenas hábitos deste objetivo
        #[arg(long)]
        objetivo: Option<String>,
        /// Filtra por frequência (repetível)
        #[arg(long)]
        frequencia: Vec<Frequencia>,
    },
    /// Detalhes de um hábito
    Get { id: String },
    /// Cria um hábito
    Create {
        #[arg(long)]
        objetivo: String,
        #[arg(short = 't', long)]
        titulo: String,
        #[arg(short = 'd', long)]
        descricao: Option<String>,
        #[arg(short = 'f', long)]
        frequencia: Option<Frequencia>,
        /// Meta de realizações por período
        #[arg(long)]
        alvo: Option<u32>,
        #[arg(short = 's', long)]
        status: Option<StatusHabito>,
    },
    /// Atualiza apenas os campos informados
    Update {
        id: String,
        #[arg(long)]
        objetivo: Option<String>,
        #[arg(short = 't', long)]
        titulo: Option<String>,
        #[arg(short = 'd', long)]
        descricao: Option<String>,
        #[arg(short = 'f', long)]
        frequencia: Option<Frequencia>,
        #[arg(long)]
        alvo: Option<u32>,
        #[arg(short = 's', long)]
        status: Option<StatusHabito>,
    },
    /// Exclui um ou vários hábitos
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
    /// Registra uma realização no período atual
    MarcarFeito { id: String },
    /// Zera o contador do período
    ResetCiclo { id: String },
    /// Tarefas de um hábito
    Tarefas { id: String },
}

/// Filtros de tarefas aplicados localmente
#[derive(Args, Clone, Default)]
struct FiltroTarefaArgs {
    /// Apenas tarefas deste hábito
    #[arg(long)]
    habito: Option<String>,

    /// Prioridade (baixa, media, alta)
    #[arg(short = 'p', long)]
    prioridade: Option<Prioridade>,

    /// Janela de prazo (atrasado, hoje, semana, mes)
    #[arg(long)]
    prazo: Option<FiltroPrazo>,
}

impl FiltroTarefaArgs {
    fn filtro(&self, busca: Option<&str>) -> FiltroTarefas {
        FiltroTarefas {
            busca: busca.unwrap_or_default().to_string(),
            habito_id: self.habito.clone(),
            prioridade: self.prioridade,
            prazo: self.prazo,
        }
    }
}

#[derive(Subcommand)]
enum TarefaCommands {
    /// Lista tarefas
    List {
        #[command(flatten)]
        args: ListArgs,
        #[command(flatten)]
        filtros: FiltroTarefaArgs,
    },
    /// Detalhes de uma tarefa
    Get { id: String },
    /// Cria uma tarefa
    Create {
        #[arg(long)]
        habito: String,
        #[arg(short = 't', long)]
        titulo: String,
        #[arg(short = 'd', long)]
        descricao: Option<String>,
        #[arg(short = 'p', long)]
        prioridade: Option<Prioridade>,
        #[arg(short = 's', long)]
        status: Option<StatusTarefa>,
        /// Estimativa em horas
        #[arg(long)]
        estimativa: Option<f64>,
        /// Prazo (YYYY-MM-DD)
        #[arg(long, value_parser = parse_data_arg)]
        prazo: Option<NaiveDate>,
    },
    /// Atualiza apenas os campos informados
    Update {
        id: String,
        #[arg(long)]
        habito: Option<String>,
        #[arg(short = 't', long)]
        titulo: Option<String>,
        #[arg(short = 'd', long)]
        descricao: Option<String>,
        #[arg(short = 'p', long)]
        prioridade: Option<Prioridade>,
        #[arg(short = 's', long)]
        status: Option<StatusTarefa>,
        #[arg(long)]
        estimativa: Option<f64>,
        /// Horas já gastas
        #[arg(long)]
        horas_gastas: Option<f64>,
        #[arg(long, value_parser = parse_data_arg)]
        prazo: Option<NaiveDate>,
    },
    /// Exclui uma ou várias tarefas
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
enum KanbanCommands {
    /// Mostra as colunas do quadro
    Show {
        /// Busca em título e descrição
        #[arg(short = 'b', long)]
        busca: Option<String>,
        #[command(flatten)]
        filtros: FiltroTarefaArgs,
    },
    /// Move uma tarefa para outra coluna
    Move {
        id: String,
        /// Novo status (backlog, a_fazer, fazendo, bloqueada, concluida)
        status: StatusTarefa,
    },
}

/// Estrutura para resposta padronizada
#[derive(serde::Serialize)]
struct CliResponse {
    success: bool,
    data: Option<Value>,
    error: Option<String>,
}

impl CliResponse {
    fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg),
        }
    }

    fn from_result<T: serde::Serialize, E: std::fmt::Display>(result: Result<T, E>) -> anyhow::Result<Self> {
        match result {
            Ok(data) => Ok(Self::success(serde_json::to_value(data)?)),
            Err(e) => Ok(Self::error(e.to_string())),
        }
    }
}

/// Dependências de um comando
struct Contexto {
    client: GoalManagerClient,
    notifier: Arc<dyn Notifier>,
}

#[tokio::main]
async fn main() {
    if Path::new(".env").exists() {
        let _ = dotenvy::dotenv();
    }

    let cli = Cli::parse();

    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Erro: configuração inválida: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(if cli.verbose { "debug" } else { settings.log.level.as_str() });
    log_config_loaded(&Settings::run_mode(), &settings.api.base_url);

    let output_format = cli.output.clone();
    let inicio = Instant::now();

    let result = execute_command(&cli, &settings).await;

    match result {
        Ok(response) => {
            log_command_processed(command_name(&cli.command), response.success, inicio.elapsed().as_millis() as u64);
            let exit_code = if response.success { 0 } else { 1 };
            output_response(response, &output_format);
            std::process::exit(exit_code);
        }
        Err(e) => {
            log_error(&format!("Falha ao executar comando: {:#}", e));
            eprintln!("❌ Erro: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Auth { .. } => "auth",
        Commands::Health => "health",
        Commands::Dashboard => "dashboard",
        Commands::Recalcular => "recalcular",
        Commands::Objetivos { .. } => "objetivos",
        Commands::Habitos { .. } => "habitos",
        Commands::Tarefas { .. } => "tarefas",
        Commands::Kanban { .. } => "kanban",
    }
}

fn build_context(cli: &Cli, settings: &Settings) -> anyhow::Result<Contexto> {
    let mut config = settings.api_config();
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }

    let store: Arc<dyn TokenStore> = if cli.ephemeral {
        Arc::new(MemoryTokenStore::new())
    } else {
        Arc::new(FileTokenStore::new(config.token_file.clone()))
    };

    let client = GoalManagerClient::new(config, store)?;
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier {
        quiet: cli.output == OutputFormat::Json,
    });

    Ok(Contexto { client, notifier })
}

async fn execute_command(cli: &Cli, settings: &Settings) -> anyhow::Result<CliResponse> {
    log_command_received(command_name(&cli.command));
    let ctx = build_context(cli, settings)?;

    if !matches!(cli.command, Commands::Auth { .. }) {
        ctx.client.initialize_auth().await;
    }

    match &cli.command {
        Commands::Auth { action } => handle_auth(&ctx, action).await,
        Commands::Health => CliResponse::from_result(ctx.client.health_check().await),
        Commands::Dashboard => {
            CliResponse::from_result(ctx.client.get_dashboard().await.map(|r| r.data))
        }
        Commands::Recalcular => {
            let result = ctx.client.recalcular_progressos().await;
            notificar(&ctx, &result, "Progressos recalculados!", "Erro ao recalcular progressos");
            CliResponse::from_result(result)
        }
        Commands::Objetivos { action } => handle_objetivos(&ctx, action).await,
        Commands::Habitos { action } => handle_habitos(&ctx, action).await,
        Commands::Tarefas { action } => handle_tarefas(&ctx, action).await,
        Commands::Kanban { action } => handle_kanban(&ctx, action).await,
    }
}

fn notificar<T, E>(ctx: &Contexto, result: &Result<T, E>, sucesso: &str, erro: &str) {
    match result {
        Ok(_) => ctx.notifier.success(sucesso),
        Err(_) => ctx.notifier.error(erro),
    }
}

async fn handle_auth(ctx: &Contexto, action: &AuthCommands) -> anyhow::Result<CliResponse> {
    let tokens = ctx.client.tokens();
    match action {
        AuthCommands::Init => {
            let ja_autenticado = tokens.has_token();
            let token = ctx.client.initialize_auth().await;
            Ok(CliResponse::success(json!({
                "message": if ja_autenticado { "Já autenticado" } else { "Autenticação inicializada" },
                "token_preview": token_preview(&token),
                "stored": tokens.has_token(),
            })))
        }
        AuthCommands::Refresh => match ctx.client.refresh_token().await {
            Ok(token) => Ok(CliResponse::success(json!({
                "message": "Token renovado com sucesso!",
                "token_preview": token_preview(&token),
            }))),
            Err(e) => Ok(CliResponse::error(e.to_string())),
        },
        AuthCommands::Status => {
            let token = tokens.stored_token();
            Ok(CliResponse::success(json!({
                "authenticated": token.is_some(),
                "token_preview": token.as_deref().map(token_preview),
                "token_file": ctx.client.config().token_file,
                "api_base_url": ctx.client.base_url(),
            })))
        }
    }
}

/// Aplica filtro e ordenação locais e devolve a lista com a paginação
fn listar<T: EntidadeLista + serde::Serialize>(
    mut itens: Vec<T>,
    filtro: impl Fn(&T) -> bool,
    ordenacao: Option<Ordenacao>,
    pagination: Option<goalmanager::api::types::ApiPagination>,
) -> anyhow::Result<CliResponse> {
    itens.retain(|i| filtro(i));
    if let Some(ordenacao) = ordenacao {
        ordenacao.ordenar(&mut itens);
    }
    Ok(CliResponse::success(json!({
        "count": itens.len(),
        "items": itens,
        "pagination": pagination,
    })))
}

async fn excluir<F, Fut>(
    ctx: &Contexto,
    ids: &[String],
    recurso: &str,
    unico: F,
    lote: Fut,
) -> anyhow::Result<CliResponse>
where
    F: std::future::Future<Output = goalmanager::api::ApiResult<()>>,
    Fut: std::future::Future<Output = goalmanager::api::ApiResult<goalmanager::api::types::DeleteManyResponse>>,
{
    let result = if ids.len() == 1 {
        unico.await.map(|_| json!({ "deleted": ids }))
    } else {
        lote.await.map(|r| json!({ "deleted": ids, "deletedCount": r.deleted_count, "message": r.message }))
    };

    match &result {
        Ok(_) => {
            log_batch_deleted(recurso, ids.len());
            ctx.notifier.success(&format!("Exclusão concluída: {} {}", ids.len(), recurso));
        }
        Err(e) => ctx.notifier.error(&format!("Erro ao excluir {}: {}", recurso, e)),
    }
    CliResponse::from_result(result)
}

async fn handle_objetivos(ctx: &Contexto, action: &ObjetivoCommands) -> anyhow::Result<CliResponse> {
    let client = &ctx.client;
    match action {
        ObjetivoCommands::List(args) => match client.get_objetivos(&args.query()).await {
            Ok(response) => {
                let filtro = args.filtro();
                listar(response.data, |o| filtro.corresponde(o), args.ordenacao(), response.pagination)
            }
            Err(e) => Ok(CliResponse::error(e.to_string())),
        },
        ObjetivoCommands::Get { id } => {
            CliResponse::from_result(client.get_objetivo(id).await.map(|r| r.data))
        }
        ObjetivoCommands::Create { titulo, descricao, inicio, fim, status } => {
            let mut novo = NovoObjetivo::new(titulo.clone());
            novo.descricao = descricao.clone();
            novo.inicio = *inicio;
            novo.fim = *fim;
            novo.status = status.unwrap_or_default();
            if let Err(e) = validar_novo_objetivo(&mut novo) {
                return Ok(CliResponse::error(e.to_string()));
            }

            let result = client.create_objetivo(&novo).await.map(|r| r.data);
            notificar(ctx, &result, "Objetivo criado com sucesso!", "Erro ao salvar objetivo");
            CliResponse::from_result(result)
        }
        ObjetivoCommands::Update { id, titulo, descricao, inicio, fim, status } => {
            let mut atualizacao = AtualizacaoObjetivo {
                titulo: titulo.clone(),
                descricao: descricao.clone(),
                inicio: *inicio,
                fim: *fim,
                status: *status,
            };
            if let Err(e) = validar_atualizacao_objetivo(&mut atualizacao) {
                return Ok(CliResponse::error(e.to_string()));
            }

            let result = client.update_objetivo(id, &atualizacao).await.map(|r| r.data);
            notificar(ctx, &result, "Objetivo atualizado com sucesso!", "Erro ao salvar objetivo");
            CliResponse::from_result(result)
        }
        ObjetivoCommands::Delete { ids } => {
            excluir(
                ctx,
                ids,
                "objetivos",
                client.delete_objetivo(&ids[0]),
                client.delete_objetivos(ids),
            )
            .await
        }
        ObjetivoCommands::Habitos { id } => {
            CliResponse::from_result(client.get_habitos_by_objetivo(id).await.map(|r| r.data))
        }
        ObjetivoCommands::Tarefas { id } => {
            CliResponse::from_result(client.get_tarefas_by_objetivo(id).await.map(|r| r.data))
        }
    }
}

async fn handle_habitos(ctx: &Contexto, action: &HabitoCommands) -> anyhow::Result<CliResponse> {
    let client = &ctx.client;
    match action {
        HabitoCommands::List { args, objetivo, frequencia } => {
            let mut params = args.query();
            params.objetivo_id = objetivo.clone();
            params.frequencia = frequencia.iter().map(|f| f.as_str().to_string()).collect();

            match client.get_habitos(&params).await {
                Ok(response) => {
                    let filtro = args.filtro();
                    listar(
                        response.data,
                        |h| {
                            filtro.corresponde(h)
                                && objetivo.as_ref().map_or(true, |o| &h.objetivo_id == o)
                                && (frequencia.is_empty() || frequencia.contains(&h.frequencia))
                        },
                        args.ordenacao(),
                        response.pagination,
                    )
                }
                Err(e) => Ok(CliResponse::error(e.to_string())),
            }
        }
        HabitoCommands::Get { id } => {
            CliResponse::from_result(client.get_habito(id).await.map(|r| r.data))
        }
        HabitoCommands::Create { objetivo, titulo, descricao, frequencia, alvo, status } => {
            let mut novo = NovoHabito::new(objetivo.clone(), titulo.clone());
            novo.descricao = descricao.clone();
            novo.frequencia = frequencia.unwrap_or_default();
            novo.alvo_por_periodo = alvo.unwrap_or(1);
            novo.status = status.unwrap_or_default();
            if let Err(e) = validar_novo_habito(&mut novo) {
                return Ok(CliResponse::error(e.to_string()));
            }

            let result = client.create_habito(&novo).await.map(|r| r.data);
            notificar(ctx, &result, "Hábito criado com sucesso!", "Erro ao salvar hábito");
            CliResponse::from_result(result)
        }
        HabitoCommands::Update { id, objetivo, titulo, descricao, frequencia, alvo, status } => {
            let mut atualizacao = AtualizacaoHabito {
                objetivo_id: objetivo.clone(),
                titulo: titulo.clone(),
                descricao: descricao.clone(),
                frequencia: *frequencia,
                alvo_por_periodo: *alvo,
                status: *status,
            };
            if let Err(e) = validar_atualizacao_habito(&mut atualizacao) {
                return Ok(CliResponse::error(e.to_string()));
            }

            let result = client.update_habito(id, &atualizacao).await.map(|r| r.data);
            notificar(ctx, &result, "Hábito atualizado com sucesso!", "Erro ao salvar hábito");
            CliResponse::from_result(result)
        }
        HabitoCommands::Delete { ids } => {
            excluir(
                ctx,
                ids,
                "hábitos",
                client.delete_habito(&ids[0]),
                client.delete_habitos(ids),
            )
            .await
        }
        HabitoCommands::MarcarFeito { id } | HabitoCommands::ResetCiclo { id } => {
            let habito = match client.get_habito(id).await {
                Ok(response) => response.data,
                Err(e) => return Ok(CliResponse::error(e.to_string())),
            };
            let mut lista = ListState::from_itens(vec![habito]);

            let result = if matches!(action, HabitoCommands::MarcarFeito { .. }) {
                marcar_habito_feito(&mut lista, client, id, ctx.notifier.as_ref()).await
            } else {
                resetar_habito_ciclo(&mut lista, client, id, ctx.notifier.as_ref()).await
            };

            CliResponse::from_result(result.map(|_| lista.get(id).cloned()))
        }
        HabitoCommands::Tarefas { id } => {
            CliResponse::from_result(client.get_tarefas_by_habito(id).await.map(|r| r.data))
        }
    }
}

async fn handle_tarefas(ctx: &Contexto, action: &TarefaCommands) -> anyhow::Result<CliResponse> {
    let client = &ctx.client;
    match action {
        TarefaCommands::List { args, filtros } => {
            let mut params = args.query();
            params.habito_id = filtros.habito.clone();
            params.prioridade = filtros.prioridade.iter().map(|p| p.as_str().to_string()).collect();

            match client.get_tarefas(&params).await {
                Ok(response) => {
                    let hoje = Local::now().date_naive();
                    let filtro_lista = args.filtro();
                    let filtro = filtros.filtro(args.busca.as_deref());
                    listar(
                        response.data,
                        |t| filtro.corresponde(t, hoje) && filtro_lista.corresponde(t),
                        args.ordenacao(),
                        response.pagination,
                    )
                }
                Err(e) => Ok(CliResponse::error(e.to_string())),
            }
        }
        TarefaCommands::Get { id } => {
            CliResponse::from_result(client.get_tarefa(id).await.map(|r| r.data))
        }
        TarefaCommands::Create { habito, titulo, descricao, prioridade, status, estimativa, prazo } => {
            let mut nova = NovaTarefa::new(habito.clone(), titulo.clone());
            nova.descricao = descricao.clone();
            nova.prioridade = *prioridade;
            nova.status = status.unwrap_or_default();
            nova.estimativa_horas = *estimativa;
            nova.prazo = *prazo;
            if let Err(e) = validar_nova_tarefa(&mut nova) {
                return Ok(CliResponse::error(e.to_string()));
            }

            let result = client.create_tarefa(&nova).await.map(|r| r.data);
            notificar(ctx, &result, "Tarefa criada com sucesso!", "Erro ao salvar tarefa");
            CliResponse::from_result(result)
        }
        TarefaCommands::Update {
            id,
            habito,
            titulo,
            descricao,
            prioridade,
            status,
            estimativa,
            horas_gastas,
            prazo,
        } => {
            let mut atualizacao = AtualizacaoTarefa {
                habito_id: habito.clone(),
                titulo: titulo.clone(),
                descricao: descricao.clone(),
                prioridade: *prioridade,
                status: *status,
                estimativa_horas: *estimativa,
                horas_gastas: *horas_gastas,
                prazo: *prazo,
                progresso: None,
            };
            if let Err(e) = validar_atualizacao_tarefa(&mut atualizacao) {
                return Ok(CliResponse::error(e.to_string()));
            }

            let result = client.update_tarefa(id, &atualizacao).await.map(|r| r.data);
            notificar(ctx, &result, "Tarefa atualizada com sucesso!", "Erro ao salvar tarefa");
            CliResponse::from_result(result)
        }
        TarefaCommands::Delete { ids } => {
            excluir(
                ctx,
                ids,
                "tarefas",
                client.delete_tarefa(&ids[0]),
                client.delete_tarefas(ids),
            )
            .await
        }
    }
}

async fn handle_kanban(ctx: &Contexto, action: &KanbanCommands) -> anyhow::Result<CliResponse> {
    let mut board = KanbanBoard::new(ctx.client.clone(), ctx.notifier.clone());
    if let Err(e) = board.carregar().await {
        return Ok(CliResponse::error(e.to_string()));
    }

    match action {
        KanbanCommands::Show { busca, filtros } => {
            board.filtro = filtros.filtro(busca.as_deref());
            let hoje = Local::now().date_naive();

            let colunas: Vec<Value> = board
                .colunas_em(hoje)
                .iter()
                .map(|coluna| {
                    let cards: Vec<Value> = coluna
                        .tarefas
                        .iter()
                        .map(|t| card_json(&board, t, hoje))
                        .collect();
                    json!({
                        "status": coluna.status,
                        "titulo": coluna.titulo(),
                        "count": cards.len(),
                        "tarefas": cards,
                    })
                })
                .collect();

            Ok(CliResponse::success(json!({ "colunas": colunas })))
        }
        KanbanCommands::Move { id, status } => match board.mover_tarefa(id, *status).await {
            MoveOutcome::Inalterada => Ok(CliResponse::success(json!({
                "message": format!("Tarefa já está em {}", status.label()),
            }))),
            MoveOutcome::NaoEncontrada => Ok(CliResponse::error(format!("Tarefa {} não encontrada no quadro", id))),
            MoveOutcome::Confirmada(tarefa) => Ok(CliResponse::success(serde_json::to_value(tarefa)?)),
            MoveOutcome::Revertida { anterior, erro } => Ok(CliResponse::error(format!(
                "Movimento revertido para {}: {}",
                anterior.label(),
                erro
            ))),
        },
    }
}

fn card_json(board: &KanbanBoard, tarefa: &Tarefa, hoje: NaiveDate) -> Value {
    json!({
        "id": tarefa.id,
        "titulo": truncate_with_suffix(&tarefa.titulo, TITULO_CARD_MAX, "..."),
        "habito": board.habito(&tarefa.habito_id).map(|h| h.titulo.as_str()),
        "prioridade": tarefa.prioridade,
        "prazo": tarefa.prazo,
        "atrasada": tarefa.esta_atrasada(hoje),
    })
}

fn parse_data_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_data(raw).ok_or_else(|| format!("Data inválida: {}. Use YYYY-MM-DD", raw))
}

fn output_response(response: CliResponse, format: &OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string(&response) {
            Ok(texto) => println!("{}", texto),
            Err(e) => eprintln!("❌ Erro ao serializar resposta: {}", e),
        },
        OutputFormat::Pretty => {
            if response.success {
                if let Some(data) = response.data {
                    println!("✅ Sucesso!");
                    match serde_json::to_string_pretty(&data) {
                        Ok(texto) => println!("{}", texto),
                        Err(e) => eprintln!("❌ Erro ao serializar resposta: {}", e),
                    }
                }
            } else if let Some(error) = response.error {
                eprintln!("❌ Erro: {}", error);
            }
        }
    }
}
