pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryTodoStore;
pub use postgres::PgTodoStore;
pub use store::{TodoSession, TodoStore};
