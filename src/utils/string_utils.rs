/// Utilitários para manipulação segura de strings UTF-8

/// Trunca uma string sem cortar um caractere UTF-8 no meio
///
/// # Exemplo
/// ```
/// use goalmanager::utils::string_utils::truncate_safe;
///
/// assert_eq!(truncate_safe("Olá, mundo!", 3), "Ol");
/// ```
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Trunca e adiciona um sufixo (como "...") apenas quando houve corte
pub fn truncate_with_suffix(s: &str, max_bytes: usize, suffix: &str) -> String {
    let truncated = truncate_safe(s, max_bytes);
    if truncated.len() < s.len() {
        format!("{}{}", truncated.trim_end(), suffix)
    } else {
        truncated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_safe_utf8() {
        let text = "Concluída";
        assert_eq!(truncate_safe(text, 8), "Conclu");
        assert_eq!(truncate_safe(text, 9), "Concluí");
        assert_eq!(truncate_safe(text, 100), text);
    }

    #[test]
    fn test_truncate_with_suffix() {
        assert_eq!(truncate_with_suffix("Ler um livro por mês", 7, "..."), "Ler um...");
        assert_eq!(truncate_with_suffix("Correr", 10, "..."), "Correr");
    }
}
