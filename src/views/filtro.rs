//! Filtros das listas e do kanban
//!
//! Datas relativas são calculadas a partir de `hoje`, recebido do chamador.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use goalmanager_api::types::{Prioridade, Tarefa};

use super::entidade::EntidadeLista;
use crate::utils::normalization::contains_normalized;

/// Janela de prazo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiltroPrazo {
    /// Antes de hoje e não concluída
    Atrasado,
    Hoje,
    /// De hoje até hoje + 7 dias
    Semana,
    /// De hoje até hoje + 1 mês
    Mes,
}

impl FiltroPrazo {
    pub fn as_str(&self) -> &'static str {
        match self {
            FiltroPrazo::Atrasado => "atrasado",
            FiltroPrazo::Hoje => "hoje",
            FiltroPrazo::Semana => "semana",
            FiltroPrazo::Mes => "mes",
        }
    }

    /// Tarefas sem prazo nunca entram numa janela
    pub fn corresponde(&self, tarefa: &Tarefa, hoje: NaiveDate) -> bool {
        let Some(prazo) = tarefa.prazo else {
            return false;
        };

        match self {
            FiltroPrazo::Atrasado => tarefa.esta_atrasada(hoje),
            FiltroPrazo::Hoje => prazo == hoje,
            FiltroPrazo::Semana => {
                let limite = hoje.checked_add_days(Days::new(7)).unwrap_or(NaiveDate::MAX);
                prazo >= hoje && prazo <= limite
            }
            FiltroPrazo::Mes => {
                let limite = hoje.checked_add_months(Months::new(1)).unwrap_or(NaiveDate::MAX);
                prazo >= hoje && prazo <= limite
            }
        }
    }
}

impl fmt::Display for FiltroPrazo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FiltroPrazo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atrasado" => Ok(FiltroPrazo::Atrasado),
            "hoje" => Ok(FiltroPrazo::Hoje),
            "semana" => Ok(FiltroPrazo::Semana),
            "mes" | "mês" => Ok(FiltroPrazo::Mes),
            _ => Err(format!("Filtro de prazo desconhecido: {}", s)),
        }
    }
}

/// Filtros do kanban e da tabela de tarefas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltroTarefas {
    pub busca: String,
    pub habito_id: Option<String>,
    pub prioridade: Option<Prioridade>,
    pub prazo: Option<FiltroPrazo>,
}

impl FiltroTarefas {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn limpar(&mut self) {
        *self = Self::default();
    }

    pub fn corresponde(&self, tarefa: &Tarefa, hoje: NaiveDate) -> bool {
        if !busca_corresponde(tarefa, &self.busca) {
            return false;
        }
        if let Some(habito_id) = &self.habito_id {
            if &tarefa.habito_id != habito_id {
                return false;
            }
        }
        if let Some(prioridade) = self.prioridade {
            if tarefa.prioridade != Some(prioridade) {
                return false;
            }
        }
        match self.prazo {
            Some(prazo) => prazo.corresponde(tarefa, hoje),
            None => true,
        }
    }

    pub fn aplicar<'a>(&self, tarefas: &'a [Tarefa], hoje: NaiveDate) -> Vec<&'a Tarefa> {
        tarefas.iter().filter(|t| self.corresponde(t, hoje)).collect()
    }
}

/// Filtros de objetivos e hábitos: busca e status (valores de wire)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiltroLista {
    pub busca: String,
    pub status: Vec<String>,
}

impl FiltroLista {
    pub fn limpar(&mut self) {
        *self = Self::default();
    }

    pub fn corresponde<T: EntidadeLista>(&self, item: &T) -> bool {
        busca_corresponde(item, &self.busca)
            && (self.status.is_empty() || self.status.iter().any(|s| s == item.status_str()))
    }

    pub fn aplicar<'a, T: EntidadeLista>(&self, itens: &'a [T]) -> Vec<&'a T> {
        itens.iter().filter(|i| self.corresponde(*i)).collect()
    }
}

/// Busca em título e descrição, sem diferenciar caixa nem acentos
fn busca_corresponde<T: EntidadeLista>(item: &T, busca: &str) -> bool {
    let textos = std::iter::once(item.titulo()).chain(item.descricao());
    contains_normalized(textos, busca)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::test_support::{habito, tarefa};
    use goalmanager_api::types::{StatusHabito, StatusTarefa};

    fn hoje() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn com_prazo(id: &str, prazo: Option<NaiveDate>, status: StatusTarefa) -> Tarefa {
        let mut t = tarefa(id, "h1", status);
        t.prazo = prazo;
        t
    }

    fn dia(d: u32, m: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, m, d)
    }

    #[test]
    fn test_prazo_atrasado() {
        let f = FiltroPrazo::Atrasado;
        assert!(f.corresponde(&com_prazo("1", dia(9, 3), StatusTarefa::Fazendo), hoje()));
        assert!(!f.corresponde(&com_prazo("2", dia(9, 3), StatusTarefa::Concluida), hoje()));
        assert!(!f.corresponde(&com_prazo("3", dia(10, 3), StatusTarefa::Fazendo), hoje()));
        assert!(!f.corresponde(&com_prazo("4", None, StatusTarefa::Fazendo), hoje()));
    }

    #[test]
    fn test_prazo_hoje_semana_mes() {
        let hoje_t = com_prazo("1", dia(10, 3), StatusTarefa::Backlog);
        let seis_dias = com_prazo("2", dia(16, 3), StatusTarefa::Backlog);
        let sete_dias = com_prazo("3", dia(17, 3), StatusTarefa::Backlog);
        let oito_dias = com_prazo("4", dia(18, 3), StatusTarefa::Backlog);
        let um_mes = com_prazo("5", dia(10, 4), StatusTarefa::Backlog);
        let passado = com_prazo("6", dia(1, 3), StatusTarefa::Backlog);
        let sem_prazo = com_prazo("7", None, StatusTarefa::Backlog);

        assert!(FiltroPrazo::Hoje.corresponde(&hoje_t, hoje()));
        assert!(!FiltroPrazo::Hoje.corresponde(&seis_dias, hoje()));

        assert!(FiltroPrazo::Semana.corresponde(&hoje_t, hoje()));
        assert!(FiltroPrazo::Semana.corresponde(&sete_dias, hoje()));
        assert!(!FiltroPrazo::Semana.corresponde(&oito_dias, hoje()));
        assert!(!FiltroPrazo::Semana.corresponde(&passado, hoje()));

        assert!(FiltroPrazo::Mes.corresponde(&um_mes, hoje()));
        assert!(FiltroPrazo::Mes.corresponde(&oito_dias, hoje()));
        assert!(!FiltroPrazo::Mes.corresponde(&com_prazo("8", dia(11, 4), StatusTarefa::Backlog), hoje()));
        assert!(!FiltroPrazo::Mes.corresponde(&sem_prazo, hoje()));
    }

    #[test]
    fn test_busca_ignora_caixa_e_acentos() {
        let mut t = tarefa("1", "h1", StatusTarefa::Backlog);
        t.titulo = "Revisão do capítulo".to_string();
        t.descricao = Some("Anotar dúvidas".to_string());

        let mut f = FiltroTarefas::default();
        f.busca = "REVISAO".to_string();
        assert!(f.corresponde(&t, hoje()));
        f.busca = "duvidas".to_string();
        assert!(f.corresponde(&t, hoje()));
        f.busca = "exercício".to_string();
        assert!(!f.corresponde(&t, hoje()));
    }

    #[test]
    fn test_filtros_combinados_e_limpar() {
        let mut alta = tarefa("1", "h1", StatusTarefa::Backlog);
        alta.prioridade = Some(Prioridade::Alta);
        let mut baixa_h2 = tarefa("2", "h2", StatusTarefa::Backlog);
        baixa_h2.prioridade = Some(Prioridade::Baixa);
        let sem_prioridade = tarefa("3", "h1", StatusTarefa::Backlog);
        let tarefas = vec![alta, baixa_h2, sem_prioridade];

        let mut f = FiltroTarefas {
            habito_id: Some("h1".to_string()),
            ..FiltroTarefas::default()
        };
        let filtradas = f.aplicar(&tarefas, hoje());
        let ids: Vec<&str> = filtradas.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        f.prioridade = Some(Prioridade::Alta);
        assert_eq!(f.aplicar(&tarefas, hoje()).len(), 1);

        f.limpar();
        assert!(f.is_empty());
        assert_eq!(f.aplicar(&tarefas, hoje()).len(), 3);
    }

    #[test]
    fn test_filtro_lista_por_status() {
        let ativo = habito("h1", "o1", StatusHabito::Ativo);
        let pausado = habito("h2", "o1", StatusHabito::Pausado);
        let habitos = vec![ativo, pausado];

        let f = FiltroLista {
            busca: String::new(),
            status: vec!["pausado".to_string()],
        };
        let filtrados = f.aplicar(&habitos);
        assert_eq!(filtrados.len(), 1);
        assert_eq!(filtrados[0].id, "h2");
    }

    #[test]
    fn test_filtro_prazo_from_str() {
        assert_eq!("Semana".parse::<FiltroPrazo>(), Ok(FiltroPrazo::Semana));
        assert_eq!("mês".parse::<FiltroPrazo>(), Ok(FiltroPrazo::Mes));
        assert!("ontem".parse::<FiltroPrazo>().is_err());
    }
}
