use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Inicializa o subscriber; `RUST_LOG` tem precedência sobre `default_level`
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Pode já estar inicializado (testes, chamadas repetidas)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn log_command_received(command: &str) {
    debug!("Command received: {}", command);
}

pub fn log_command_processed(command: &str, success: bool, duration_ms: u64) {
    info!("Command processed: {} - Success: {} - Duration: {}ms",
          command, success, duration_ms);
}

pub fn log_api_error(operation: &str, status: Option<u16>, error: &str) {
    error!("Goal Manager API error: {} - Status: {:?} - Error: {}", operation, status, error);
}

pub fn log_config_loaded(env: &str, api_base_url: &str) {
    info!("Configuration loaded successfully for environment: {} ({})", env, api_base_url);
}

pub fn log_tarefa_moved(tarefa_id: &str, from: &str, to: &str) {
    info!("🔀 Tarefa {} movida: {} → {}", tarefa_id, from, to);
}

pub fn log_tarefa_move_reverted(tarefa_id: &str, to: &str, error: &str) {
    warn!("↩️ Movimento da tarefa {} revertido para {}: {}", tarefa_id, to, error);
}

pub fn log_batch_deleted(recurso: &str, count: usize) {
    info!("🗑️ Exclusão em lote: {} {}", count, recurso);
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}
