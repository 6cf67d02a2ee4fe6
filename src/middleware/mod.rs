pub mod auth;
pub mod extract;
pub mod session;

pub use auth::{AuthUser, CurrentUser};
pub use extract::{TodoId, TodoPayload};
pub use session::DbSession;
