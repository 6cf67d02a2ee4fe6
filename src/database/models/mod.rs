pub mod todo;
pub mod user;

pub use todo::{Todo, TodoRequest};
pub use user::User;
