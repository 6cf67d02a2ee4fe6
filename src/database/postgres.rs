use async_trait::async_trait;
use sqlx::{pool::PoolConnection, PgPool, Postgres};

use crate::database::manager::DatabaseError;
use crate::database::models::{Todo, TodoRequest};
use crate::database::store::{TodoSession, TodoStore};

const TODO_COLUMNS: &str = "id, title, description, priority, complete, owner_id";

/// PostgreSQL-backed store. Each session holds one pooled connection.
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn session(&self) -> Result<Box<dyn TodoSession>, DatabaseError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PgTodoSession { conn }))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Returns its connection to the pool on drop.
pub struct PgTodoSession {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl TodoSession for PgTodoSession {
    async fn list(&mut self, owner_id: i64) -> Result<Vec<Todo>, DatabaseError> {
        let sql = format!("SELECT {} FROM todos WHERE owner_id = $1 ORDER BY id", TODO_COLUMNS);
        let rows = sqlx::query_as::<_, Todo>(&sql)
            .bind(owner_id)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    async fn find(&mut self, owner_id: i64, id: i64) -> Result<Option<Todo>, DatabaseError> {
        let sql = format!("SELECT {} FROM todos WHERE id = $1 AND owner_id = $2", TODO_COLUMNS);
        let row = sqlx::query_as::<_, Todo>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn insert(&mut self, owner_id: i64, request: &TodoRequest) -> Result<Todo, DatabaseError> {
        let sql = format!(
            "INSERT INTO todos (title, description, priority, complete, owner_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TODO_COLUMNS
        );
        let row = sqlx::query_as::<_, Todo>(&sql)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.priority)
            .bind(request.complete)
            .bind(owner_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn update(
        &mut self,
        owner_id: i64,
        id: i64,
        request: &TodoRequest,
    ) -> Result<Option<Todo>, DatabaseError> {
        let sql = format!(
            "UPDATE todos SET title = $1, description = $2, priority = $3, complete = $4 \
             WHERE id = $5 AND owner_id = $6 RETURNING {}",
            TODO_COLUMNS
        );
        let row = sqlx::query_as::<_, Todo>(&sql)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.priority)
            .bind(request.complete)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(row)
    }

    async fn delete(&mut self, owner_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
