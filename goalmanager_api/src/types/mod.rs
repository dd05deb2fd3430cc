//! Tipos de dados da API Goal Manager

pub mod habito;
pub mod objetivo;
pub mod response;
pub mod serde_utils;
pub mod status;
pub mod tarefa;

pub use habito::{AtualizacaoHabito, Habito, HabitoCiclo, NovoHabito};
pub use objetivo::{AtualizacaoObjetivo, NovoObjetivo, Objetivo};
pub use response::{
    ApiErrorBody, ApiPagination, ApiResponse, DashboardData, DeleteManyResponse, HealthStatus,
    RecalculoResponse, UsuarioAutenticado,
};
pub use status::{Frequencia, Prioridade, StatusHabito, StatusObjetivo, StatusTarefa};
pub use tarefa::{AtualizacaoTarefa, NovaTarefa, Tarefa, PROGRESSO_CONCLUIDA};

/// Entidades com identificador próprio
pub trait Identificavel {
    fn id(&self) -> &str;
}
