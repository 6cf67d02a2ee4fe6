use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Todo, TodoRequest};
use crate::database::store::{TodoSession, TodoStore};

/// In-process todo table for local runs and tests. Ids start at 1 and are
/// never reused, like a serial column.
#[derive(Clone, Default)]
pub struct MemoryTodoStore {
    table: Arc<RwLock<MemoryTable>>,
}

#[derive(Default)]
struct MemoryTable {
    last_id: i64,
    rows: BTreeMap<i64, Todo>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all owners.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn session(&self) -> Result<Box<dyn TodoSession>, DatabaseError> {
        Ok(Box::new(MemoryTodoSession {
            table: Arc::clone(&self.table),
        }))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

pub struct MemoryTodoSession {
    table: Arc<RwLock<MemoryTable>>,
}

#[async_trait]
impl TodoSession for MemoryTodoSession {
    async fn list(&mut self, owner_id: i64) -> Result<Vec<Todo>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|todo| todo.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find(&mut self, owner_id: i64, id: i64) -> Result<Option<Todo>, DatabaseError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .filter(|todo| todo.owner_id == owner_id)
            .cloned())
    }

    async fn insert(&mut self, owner_id: i64, request: &TodoRequest) -> Result<Todo, DatabaseError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let todo = Todo {
            id: table.last_id,
            title: request.title.clone(),
            description: request.description.clone(),
            priority: request.priority,
            complete: request.complete,
            owner_id,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(
        &mut self,
        owner_id: i64,
        id: i64,
        request: &TodoRequest,
    ) -> Result<Option<Todo>, DatabaseError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(todo) if todo.owner_id == owner_id => {
                request.apply_to(todo);
                Ok(Some(todo.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&mut self, owner_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let mut table = self.table.write().await;
        let owned = table
            .rows
            .get(&id)
            .is_some_and(|todo| todo.owner_id == owner_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }
}
