pub mod kanban;

pub use kanban::{ColunaKanban, KanbanBoard, MoveOutcome, MovimentoPendente};
