use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::FieldErrors;

pub const TITLE_MIN_LEN: usize = 3;
pub const DESCRIPTION_MIN_LEN: usize = 3;
pub const DESCRIPTION_MAX_LEN: usize = 100;
pub const PRIORITY_MIN: i32 = 1;
pub const PRIORITY_MAX: i32 = 5;

/// A stored todo item. `owner_id` is always the creating user's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
    pub owner_id: i64,
}

/// Body of POST and PUT. Every mutable field is required; `id` and
/// `owner_id` are not accepted from clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub complete: bool,
}

impl TodoRequest {
    /// Field constraints, collected so a client sees every problem at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.title.chars().count() < TITLE_MIN_LEN {
            errors.insert(
                "title".to_string(),
                format!("must be at least {} characters", TITLE_MIN_LEN),
            );
        }

        let description_len = self.description.chars().count();
        if !(DESCRIPTION_MIN_LEN..=DESCRIPTION_MAX_LEN).contains(&description_len) {
            errors.insert(
                "description".to_string(),
                format!(
                    "must be between {} and {} characters",
                    DESCRIPTION_MIN_LEN, DESCRIPTION_MAX_LEN
                ),
            );
        }

        if !(PRIORITY_MIN..=PRIORITY_MAX).contains(&self.priority) {
            errors.insert(
                "priority".to_string(),
                format!("must be between {} and {}", PRIORITY_MIN, PRIORITY_MAX),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Overwrites every mutable field of `todo`, leaving `id` and `owner_id`.
    pub fn apply_to(&self, todo: &mut Todo) {
        todo.title = self.title.clone();
        todo.description = self.description.clone();
        todo.priority = self.priority;
        todo.complete = self.complete;
    }
}
