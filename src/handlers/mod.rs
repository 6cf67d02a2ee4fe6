// Public: / and /health. Authenticated: /items/todos*
pub mod health;
pub mod todos;
