use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

/// Held for the bootstrap transaction so concurrent starts don't race on DDL
const SCHEMA_LOCK_KEY: i64 = 0x746f_646f_5f61_7069;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL DEFAULT 'user',
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )
"#;

const CREATE_TODOS: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        priority INTEGER NOT NULL CHECK (priority BETWEEN 1 AND 5),
        complete BOOLEAN NOT NULL DEFAULT FALSE,
        owner_id BIGINT NOT NULL REFERENCES users (id)
    )
"#;

const CREATE_TODOS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS todos_owner_id_idx ON todos (owner_id)";

/// Create `users` and `todos` if missing. Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;
    for statement in [CREATE_USERS, CREATE_TODOS, CREATE_TODOS_OWNER_INDEX] {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    info!("Database schema is up to date");
    Ok(())
}

/// Insert a user so todos can reference it as their owner
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username, role) VALUES ($1, $2) RETURNING id, username, role, is_active",
    )
    .bind(username)
    .bind(role)
    .fetch_one(pool)
    .await?;

    info!("Created user '{}' with id {}", user.username, user.id);
    Ok(user)
}
