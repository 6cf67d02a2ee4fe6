use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row in `users`; todos reference it through `owner_id`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub is_active: bool,
}
