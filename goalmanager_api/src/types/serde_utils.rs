//! Deserializadores tolerantes para campos que o backend devolve em formatos variados

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Datas ISO opcionais (`inicio`, `fim`, `prazo`).
///
/// Aceita `YYYY-MM-DD` ou um timestamp RFC 3339 completo; serializa sempre como `YYYY-MM-DD`.
pub mod data_iso {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_data(raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("data inválida: {}", raw))),
        }
    }

    pub fn parse_data(raw: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        super::parse_sem_offset(raw).map(|dt| dt.date())
    }
}

/// Timestamps sem offset (`2025-03-10T00:00:00`), formato comum em backends Python
fn parse_sem_offset(raw: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `createdAt`/`updatedAt`: RFC 3339, sem offset (lido como UTC) ou só a data
pub mod timestamp {
    use super::*;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(raw.trim())
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp inválido: {}", raw)))
    }

    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Some(naive) = parse_sem_offset(raw) {
            return Some(naive.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

/// Números opcionais que podem chegar como `12.5`, `"12.5"` ou `null`
pub mod numero_flexivel {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Bruto {
        Numero(f64),
        Texto(String),
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(n) => serializer.serialize_f64(*n),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Bruto>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Bruto::Numero(n)) => Ok(Some(n)),
            // Texto não numérico vira ausente, como o parseFloat do formulário
            Some(Bruto::Texto(s)) => Ok(s.trim().parse::<f64>().ok()),
        }
    }
}
