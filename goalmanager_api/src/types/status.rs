//! Enumerações do domínio: status de cada entidade, prioridade e frequência
//!
//! Os valores de fio (`as_str`) são os mesmos aceitos pelo backend; `label` é o texto
//! exibido ao usuário.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! enum_dominio {
    (
        $(#[$meta:meta])*
        $nome:ident {
            $( $variante:ident => $fio:literal, $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $nome {
            $(
                #[serde(rename = $fio)]
                $variante,
            )+
        }

        impl $nome {
            /// Todos os valores, na ordem de exibição
            pub const TODOS: &'static [$nome] = &[$($nome::$variante),+];

            /// Valor usado na API
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($nome::$variante => $fio,)+
                }
            }

            /// Nome legível
            pub fn label(&self) -> &'static str {
                match self {
                    $($nome::$variante => $label,)+
                }
            }
        }

        impl fmt::Display for $nome {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }

        impl FromStr for $nome {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let valor = s.trim().to_lowercase();
                $nome::TODOS
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == valor || v.label().to_lowercase() == valor)
                    .ok_or_else(|| format!("Valor desconhecido para {}: {}", stringify!($nome), s))
            }
        }
    };
}

enum_dominio! {
    /// Status de um objetivo
    StatusObjetivo {
        Planejado => "planejado", "Planejado",
        EmAndamento => "em_andamento", "Em Andamento",
        Concluido => "concluido", "Concluído",
        Arquivado => "arquivado", "Arquivado",
    }
}

enum_dominio! {
    /// Status de um hábito
    StatusHabito {
        Ativo => "ativo", "Ativo",
        Pausado => "pausado", "Pausado",
        Concluido => "concluido", "Concluído",
    }
}

enum_dominio! {
    /// Status de uma tarefa. Também define as colunas do kanban, nesta ordem.
    StatusTarefa {
        Backlog => "backlog", "Backlog",
        AFazer => "a_fazer", "A Fazer",
        Fazendo => "fazendo", "Fazendo",
        Bloqueada => "bloqueada", "Bloqueada",
        Concluida => "concluida", "Concluída",
    }
}

enum_dominio! {
    /// Prioridade opcional de uma tarefa
    Prioridade {
        Baixa => "baixa", "Baixa",
        Media => "media", "Média",
        Alta => "alta", "Alta",
    }
}

enum_dominio! {
    /// Frequência de um hábito
    Frequencia {
        Diario => "diario", "Diário",
        Semanal => "semanal", "Semanal",
        Mensal => "mensal", "Mensal",
    }
}

impl Default for StatusObjetivo {
    fn default() -> Self {
        StatusObjetivo::Planejado
    }
}

impl Default for StatusHabito {
    fn default() -> Self {
        StatusHabito::Ativo
    }
}

impl Default for StatusTarefa {
    fn default() -> Self {
        StatusTarefa::Backlog
    }
}

impl Default for Frequencia {
    fn default() -> Self {
        Frequencia::Diario
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valores_de_fio() {
        assert_eq!(StatusTarefa::AFazer.as_str(), "a_fazer");
        assert_eq!(StatusObjetivo::EmAndamento.as_str(), "em_andamento");
        assert_eq!(Prioridade::Media.as_str(), "media");
        assert_eq!(
            serde_json::to_string(&StatusTarefa::Bloqueada).unwrap(),
            "\"bloqueada\""
        );
        let s: StatusTarefa = serde_json::from_str("\"concluida\"").unwrap();
        assert_eq!(s, StatusTarefa::Concluida);
    }

    #[test]
    fn test_ordem_das_colunas() {
        let labels: Vec<_> = StatusTarefa::TODOS.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Backlog", "A Fazer", "Fazendo", "Bloqueada", "Concluída"]);
    }

    #[test]
    fn test_from_str_aceita_fio_e_label() {
        assert_eq!("fazendo".parse::<StatusTarefa>(), Ok(StatusTarefa::Fazendo));
        assert_eq!("A Fazer".parse::<StatusTarefa>(), Ok(StatusTarefa::AFazer));
        assert_eq!("ALTA".parse::<Prioridade>(), Ok(Prioridade::Alta));
        assert!("urgente".parse::<Prioridade>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(StatusTarefa::default(), StatusTarefa::Backlog);
        assert_eq!(StatusHabito::default(), StatusHabito::Ativo);
        assert_eq!(Frequencia::default(), Frequencia::Diario);
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusTarefa::Concluida.to_string(), "Concluída");
        assert_eq!(Frequencia::Semanal.to_string(), "Semanal");
    }
}
