pub mod session;
pub mod token;

pub use session::TokenManager;
pub use token::{token_preview, FileTokenStore, MemoryTokenStore, TokenStore};
