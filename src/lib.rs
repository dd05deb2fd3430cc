// Biblioteca do cliente Goal Manager
// Expõe módulos para uso em testes e no binário

pub mod board;
pub mod config;
pub mod notify;
pub mod utils;
pub mod views;

pub use goalmanager_api as api;
