//! Notificações transitórias exibidas ao usuário (sucesso / erro)

#[cfg(test)]
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NivelNotificacao {
    Sucesso,
    Erro,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notificacao {
    pub nivel: NivelNotificacao,
    pub mensagem: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notificacao: Notificacao);

    fn success(&self, mensagem: &str) {
        self.notify(Notificacao {
            nivel: NivelNotificacao::Sucesso,
            mensagem: mensagem.to_string(),
        });
    }

    fn error(&self, mensagem: &str) {
        self.notify(Notificacao {
            nivel: NivelNotificacao::Erro,
            mensagem: mensagem.to_string(),
        });
    }
}

/// Escreve as notificações em stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier {
    pub quiet: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notificacao: Notificacao) {
        match notificacao.nivel {
            NivelNotificacao::Sucesso => {
                tracing::info!("{}", notificacao.mensagem);
                if !self.quiet {
                    eprintln!("✅ {}", notificacao.mensagem);
                }
            }
            NivelNotificacao::Erro => {
                tracing::error!("{}", notificacao.mensagem);
                if !self.quiet {
                    eprintln!("❌ {}", notificacao.mensagem);
                }
            }
        }
    }
}

/// Guarda as notificações em memória
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    registradas: Mutex<Vec<Notificacao>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notificacao> {
        self.registradas
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn errors(&self) -> Vec<String> {
        self.filtrar(NivelNotificacao::Erro)
    }

    pub fn successes(&self) -> Vec<String> {
        self.filtrar(NivelNotificacao::Sucesso)
    }

    fn filtrar(&self, nivel: NivelNotificacao) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.nivel == nivel)
            .map(|n| n.mensagem)
            .collect()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notificacao: Notificacao) {
        if let Ok(mut registradas) = self.registradas.lock() {
            registradas.push(notificacao);
        }
    }
}
