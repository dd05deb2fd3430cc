//! Ordenação das listas por campo e direção

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use goalmanager_api::Direcao;

use super::entidade::EntidadeLista;
use crate::utils::normalization::normalize_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampoOrdenacao {
    Titulo,
    Status,
    Progresso,
    /// Prazo (tarefas) ou fim (objetivos)
    Prazo,
    #[default]
    CriadoEm,
}

impl CampoOrdenacao {
    /// Nome do campo em `orderBy`
    pub fn as_str(&self) -> &'static str {
        match self {
            CampoOrdenacao::Titulo => "titulo",
            CampoOrdenacao::Status => "status",
            CampoOrdenacao::Progresso => "progresso",
            CampoOrdenacao::Prazo => "prazo",
            CampoOrdenacao::CriadoEm => "createdAt",
        }
    }
}

impl fmt::Display for CampoOrdenacao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CampoOrdenacao {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "titulo" | "título" => Ok(CampoOrdenacao::Titulo),
            "status" => Ok(CampoOrdenacao::Status),
            "progresso" => Ok(CampoOrdenacao::Progresso),
            "prazo" | "fim" => Ok(CampoOrdenacao::Prazo),
            "createdat" | "criado" | "criadoem" => Ok(CampoOrdenacao::CriadoEm),
            _ => Err(format!("Campo de ordenação desconhecido: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ordenacao {
    pub campo: CampoOrdenacao,
    pub direcao: Direcao,
}

impl Ordenacao {
    pub fn new(campo: CampoOrdenacao, direcao: Direcao) -> Self {
        Self { campo, direcao }
    }

    /// Clicar no mesmo campo inverte a direção; outro campo começa ascendente
    pub fn alternar(&mut self, campo: CampoOrdenacao) {
        if self.campo == campo {
            self.direcao = match self.direcao {
                Direcao::Asc => Direcao::Desc,
                Direcao::Desc => Direcao::Asc,
            };
        } else {
            self.campo = campo;
            self.direcao = Direcao::Asc;
        }
    }

    /// Ordenação estável; itens sem data ficam no fim em qualquer direção
    pub fn ordenar<T: EntidadeLista>(&self, itens: &mut [T]) {
        itens.sort_by(|a, b| self.comparar(a, b));
    }

    fn comparar<T: EntidadeLista>(&self, a: &T, b: &T) -> Ordering {
        if self.campo == CampoOrdenacao::Prazo {
            return match (a.data_limite(), b.data_limite()) {
                (Some(x), Some(y)) => self.aplicar_direcao(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
        }

        let ordem = match self.campo {
            CampoOrdenacao::Titulo => normalize_string(a.titulo()).cmp(&normalize_string(b.titulo())),
            CampoOrdenacao::Status => a.status_ordem().cmp(&b.status_ordem()),
            CampoOrdenacao::Progresso => a.progresso().total_cmp(&b.progresso()),
            CampoOrdenacao::CriadoEm | CampoOrdenacao::Prazo => a.created_at().cmp(&b.created_at()),
        };
        self.aplicar_direcao(ordem)
    }

    fn aplicar_direcao(&self, ordem: Ordering) -> Ordering {
        match self.direcao {
            Direcao::Asc => ordem,
            Direcao::Desc => ordem.reverse(),
        }
    }
}
