//! Normalização de texto para a busca das listas e do kanban

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Remove acentos, converte para minúsculas e colapsa espaços (NFKD)
///
/// # Exemplos
/// ```
/// use goalmanager::utils::normalization::normalize_string;
///
/// assert_eq!(normalize_string("  Revisão   Semanal "), "revisao semanal");
/// ```
pub fn normalize_string(input: &str) -> String {
    input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// `termo` aparece em algum dos textos, ignorando caixa e acentos.
/// Termo vazio casa com tudo.
pub fn contains_normalized<'a>(textos: impl IntoIterator<Item = &'a str>, termo: &str) -> bool {
    let termo = normalize_string(termo);
    if termo.is_empty() {
        return true;
    }
    textos
        .into_iter()
        .any(|texto| normalize_string(texto).contains(&termo))
}
