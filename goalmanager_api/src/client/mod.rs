pub mod api;
pub mod query;

pub use api::GoalManagerClient;
pub use query::{Direcao, QueryParams};
