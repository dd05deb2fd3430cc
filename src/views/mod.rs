//! Estado das telas de listagem: seleção, filtros, ordenação e ações em lote

pub mod acoes;
pub mod entidade;
pub mod filtro;
pub mod lista;
pub mod ordenacao;
pub mod validacao;

#[cfg(test)]
pub(crate) mod test_support;

pub use acoes::{excluir_selecionados, marcar_habito_feito, resetar_habito_ciclo};
pub use entidade::{EntidadeLista, Recurso};
pub use filtro::{FiltroLista, FiltroPrazo, FiltroTarefas};
pub use lista::ListState;
pub use ordenacao::{CampoOrdenacao, Ordenacao};
