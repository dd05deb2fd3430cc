//! Acesso uniforme às três entidades para busca, filtro e ordenação

use chrono::{DateTime, NaiveDate, Utc};
use goalmanager_api::types::{
    Habito, Identificavel, Objetivo, StatusHabito, StatusObjetivo, StatusTarefa, Tarefa,
};

/// Coleção REST de uma entidade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurso {
    Objetivos,
    Habitos,
    Tarefas,
}

impl Recurso {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurso::Objetivos => "objetivos",
            Recurso::Habitos => "hábitos",
            Recurso::Tarefas => "tarefas",
        }
    }
}

pub trait EntidadeLista: Identificavel + Clone {
    const RECURSO: Recurso;

    fn titulo(&self) -> &str;
    fn descricao(&self) -> Option<&str>;
    /// Valor de wire do status
    fn status_str(&self) -> &'static str;
    /// Posição do status na ordem do fluxo
    fn status_ordem(&self) -> usize;
    fn progresso(&self) -> f64;
    fn created_at(&self) -> DateTime<Utc>;
    /// Prazo da tarefa ou fim do objetivo
    fn data_limite(&self) -> Option<NaiveDate>;
}

fn posicao<T: PartialEq>(todos: &[T], valor: &T) -> usize {
    todos.iter().position(|v| v == valor).unwrap_or(todos.len())
}

impl EntidadeLista for Objetivo {
    const RECURSO: Recurso = Recurso::Objetivos;

    fn titulo(&self) -> &str {
        &self.titulo
    }
    fn descricao(&self) -> Option<&str> {
        self.descricao.as_deref()
    }
    fn status_str(&self) -> &'static str {
        self.status.as_str()
    }
    fn status_ordem(&self) -> usize {
        posicao(StatusObjetivo::TODOS, &self.status)
    }
    fn progresso(&self) -> f64 {
        self.progresso
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn data_limite(&self) -> Option<NaiveDate> {
        self.fim
    }
}

impl EntidadeLista for Habito {
    const RECURSO: Recurso = Recurso::Habitos;

    fn titulo(&self) -> &str {
        &self.titulo
    }
    fn descricao(&self) -> Option<&str> {
        self.descricao.as_deref()
    }
    fn status_str(&self) -> &'static str {
        self.status.as_str()
    }
    fn status_ordem(&self) -> usize {
        posicao(StatusHabito::TODOS, &self.status)
    }
    fn progresso(&self) -> f64 {
        self.progresso
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn data_limite(&self) -> Option<NaiveDate> {
        None
    }
}

impl EntidadeLista for Tarefa {
    const RECURSO: Recurso = Recurso::Tarefas;

    fn titulo(&self) -> &str {
        &self.titulo
    }
    fn descricao(&self) -> Option<&str> {
        self.descricao.as_deref()
    }
    fn status_str(&self) -> &'static str {
        self.status.as_str()
    }
    fn status_ordem(&self) -> usize {
        posicao(StatusTarefa::TODOS, &self.status)
    }
    fn progresso(&self) -> f64 {
        self.progresso
    }
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn data_limite(&self) -> Option<NaiveDate> {
        self.prazo
    }
}
