//! Parâmetros de listagem (busca, filtros, ordenação e paginação)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direção de ordenação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direcao {
    #[default]
    Asc,
    Desc,
}

impl Direcao {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direcao::Asc => "asc",
            Direcao::Desc => "desc",
        }
    }
}

impl fmt::Display for Direcao {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direcao {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Direcao::Asc),
            "desc" => Ok(Direcao::Desc),
            _ => Err(format!("Direção desconhecida: {}", s)),
        }
    }
}

/// Query string aceita pelos endpoints de listagem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub busca: Option<String>,
    pub status: Vec<String>,
    pub inicio: Option<String>,
    pub fim: Option<String>,
    pub order_by: Option<String>,
    pub order_dir: Option<Direcao>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub objetivo_id: Option<String>,
    pub habito_id: Option<String>,
    pub prioridade: Vec<String>,
    pub frequencia: Vec<String>,
    pub prazo_inicio: Option<String>,
    pub prazo_fim: Option<String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn busca(mut self, busca: impl Into<String>) -> Self {
        self.busca = Some(busca.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status.push(status.into());
        self
    }

    pub fn prioridade(mut self, prioridade: impl Into<String>) -> Self {
        self.prioridade.push(prioridade.into());
        self
    }

    pub fn ordenar(mut self, campo: impl Into<String>, direcao: Direcao) -> Self {
        self.order_by = Some(campo.into());
        self.order_dir = Some(direcao);
        self
    }

    pub fn pagina(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn objetivo(mut self, objetivo_id: impl Into<String>) -> Self {
        self.objetivo_id = Some(objetivo_id.into());
        self
    }

    pub fn habito(mut self, habito_id: impl Into<String>) -> Self {
        self.habito_id = Some(habito_id.into());
        self
    }

    /// Pares chave/valor na ordem de envio; listas repetem a chave
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let mut single = |key: &'static str, value: Option<String>| {
            if let Some(v) = value {
                pairs.push((key, v));
            }
        };
        single("busca", self.busca.clone());
        single("inicio", self.inicio.clone());
        single("fim", self.fim.clone());
        single("orderBy", self.order_by.clone());
        single("orderDir", self.order_dir.map(|d| d.as_str().to_string()));
        single("page", self.page.map(|p| p.to_string()));
        single("limit", self.limit.map(|l| l.to_string()));
        single("objetivoId", self.objetivo_id.clone());
        single("habitoId", self.habito_id.clone());
        single("prazoInicio", self.prazo_inicio.clone());
        single("prazoFim", self.prazo_fim.clone());

        for (key, values) in [
            ("status", &self.status),
            ("prioridade", &self.prioridade),
            ("frequencia", &self.frequencia),
        ] {
            pairs.extend(values.iter().map(|v| (key, v.clone())));
        }

        pairs
    }

    /// `?chave=valor&...`, ou string vazia quando nada foi definido
    pub fn to_query_string(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        format!("?{}", encoded.join("&"))
    }
}
