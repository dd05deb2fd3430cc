//! Cliente da API Goal Manager
//!
//! Tipos de domínio (objetivos, hábitos e tarefas), ciclo de vida do token
//! de acesso e um cliente HTTP com renovação automática do token no 401.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{FileTokenStore, MemoryTokenStore, TokenManager, TokenStore};
pub use client::{Direcao, GoalManagerClient, QueryParams};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
