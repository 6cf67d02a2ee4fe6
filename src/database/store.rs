use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Todo, TodoRequest};

/// Source of per-request sessions. Shared by every request for the life of
/// the process.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Acquire a session. It is released when the returned box is dropped.
    async fn session(&self) -> Result<Box<dyn TodoSession>, DatabaseError>;

    /// Round-trip to the backing storage.
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Backend name, for logs and `/health`.
    fn backend(&self) -> &'static str;
}

/// Owner-scoped queries against `todos`. Every method filters on
/// `owner_id`; a row owned by someone else behaves exactly like a
/// missing row.
#[async_trait]
pub trait TodoSession: Send {
    async fn list(&mut self, owner_id: i64) -> Result<Vec<Todo>, DatabaseError>;

    async fn find(&mut self, owner_id: i64, id: i64) -> Result<Option<Todo>, DatabaseError>;

    async fn insert(&mut self, owner_id: i64, request: &TodoRequest) -> Result<Todo, DatabaseError>;

    /// Overwrites all mutable fields. `None` when no owned row matched.
    async fn update(
        &mut self,
        owner_id: i64,
        id: i64,
        request: &TodoRequest,
    ) -> Result<Option<Todo>, DatabaseError>;

    /// `false` when no owned row matched.
    async fn delete(&mut self, owner_id: i64, id: i64) -> Result<bool, DatabaseError>;
}
