//! Armazenamento persistente do token de acesso
//!
//! Existe no máximo um token guardado. O store em arquivo grava linhas `chave=valor`,
//! no mesmo formato de um `.env`, preservando outras chaves que o arquivo já tenha.

use std::fmt::Debug;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use crate::error::{ApiError, ApiResult};

/// Chave do token no armazenamento
pub const TOKEN_KEY: &str = "auth_token";

/// Armazenamento de no máximo um token de acesso
pub trait TokenStore: Send + Sync + Debug {
    fn load(&self) -> ApiResult<Option<String>>;
    fn save(&self, token: &str) -> ApiResult<()>;
    fn clear(&self) -> ApiResult<()>;
}

/// Prefixo curto do token para logs
pub fn token_preview(token: &str) -> String {
    let mut end = token.len().min(12);
    while end > 0 && !token.is_char_boundary(end) {
        end -= 1;
    }
    if end < token.len() {
        format!("{}...", &token[..end])
    } else {
        token.to_string()
    }
}

/// Token mantido apenas em memória (testes e sessões efêmeras)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ApiResult<Option<String>> {
        let guard = self
            .token
            .read()
            .map_err(|_| ApiError::config_error("token store envenenado"))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::config_error("token store envenenado"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ApiError::config_error("token store envenenado"))?;
        *guard = None;
        Ok(())
    }
}

/// Token persistido em arquivo
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_lines(&self) -> ApiResult<Vec<String>> {
        match std::fs::File::open(&self.path) {
            Ok(file) => {
                let mut lines = Vec::new();
                for line in BufReader::new(file).lines() {
                    lines.push(line?);
                }
                Ok(lines)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reescreve a chave do token; valor vazio remove a linha
    fn update_file(&self, value: &str) -> ApiResult<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ApiError::config_error("token store envenenado"))?;

        let prefix = format!("{}=", TOKEN_KEY);
        let mut lines: Vec<String> = self
            .read_lines()?
            .into_iter()
            .filter(|line| !line.starts_with(&prefix))
            .collect();

        if !value.is_empty() {
            lines.push(format!("{}{}", prefix, value));
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` só vale na criação; arquivos antigos também ficam restritos ao dono
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        for line in lines {
            writeln!(file, "{}", line)?;
        }

        tracing::debug!("Chave {} atualizada em {}", TOKEN_KEY, self.path.display());
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ApiResult<Option<String>> {
        let prefix = format!("{}=", TOKEN_KEY);
        let token = self
            .read_lines()?
            .into_iter()
            .find_map(|line| line.strip_prefix(&prefix).map(|v| v.trim().to_string()))
            .filter(|token| !token.is_empty());
        Ok(token)
    }

    fn save(&self, token: &str) -> ApiResult<()> {
        if token.trim().is_empty() {
            return Err(ApiError::validation_error("token vazio não pode ser armazenado"));
        }
        self.update_file(token.trim())
    }

    fn clear(&self) -> ApiResult<()> {
        self.update_file("")
    }
}
