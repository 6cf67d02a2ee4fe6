#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use todo_api_rust::app::{app, AppState};
use todo_api_rust::auth::{generate_jwt, Claims};
use todo_api_rust::config::{AppConfig, DatabaseBackend};
use todo_api_rust::database::MemoryTodoStore;

/// The real router on a free port, backed by a fresh in-memory store.
/// Lives as long as the test's runtime.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: MemoryTodoStore,
    pub client: reqwest::Client,
    config: AppConfig,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::development()).await
    }

    /// Strict mode: the auth extractor rejects before the handler runs
    pub async fn spawn_strict() -> Result<Self> {
        let mut config = AppConfig::development();
        config.security.reject_invalid_tokens = true;
        Self::spawn_with(config).await
    }

    pub async fn spawn_with(mut config: AppConfig) -> Result<Self> {
        config.database.backend = DatabaseBackend::Memory;

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        let store = MemoryTodoStore::new();
        let state = AppState::new(Arc::new(store.clone()), config.security.clone());
        let router = app(state, &config);
        tokio::spawn(async move { axum::serve(listener, router).await });

        Ok(Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            store,
            client: reqwest::Client::new(),
            config,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Bearer token for `user_id`, signed with the server's secret
    pub fn token_for(&self, user_id: i64) -> String {
        let claims = Claims::new(user_id, format!("user{}", user_id), "user", &self.config.security);
        generate_jwt(&claims, &self.config.security.jwt_secret).expect("failed to sign test token")
    }

    pub async fn create_todo(&self, user_id: i64, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/items/todos"))
            .bearer_auth(self.token_for(user_id))
            .json(body)
            .send()
            .await?)
    }

    pub async fn list_todos(&self, user_id: i64) -> Result<Vec<Value>> {
        let res = self
            .client
            .get(self.url("/items/todos"))
            .bearer_auth(self.token_for(user_id))
            .send()
            .await?;
        anyhow::ensure!(res.status().is_success(), "list failed with {}", res.status());
        Ok(res.json().await?)
    }

    pub async fn get_todo(&self, user_id: i64, id: i64) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url(&format!("/items/todos/{}", id)))
            .bearer_auth(self.token_for(user_id))
            .send()
            .await?)
    }

    pub async fn update_todo(&self, user_id: i64, id: i64, body: &Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(&format!("/items/todos/{}", id)))
            .bearer_auth(self.token_for(user_id))
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_todo(&self, user_id: i64, id: i64) -> Result<reqwest::Response> {
        Ok(self
            .client
            .delete(self.url(&format!("/items/todos/{}", id)))
            .bearer_auth(self.token_for(user_id))
            .send()
            .await?)
    }
}

pub fn buy_milk() -> Value {
    json!({
        "title": "Buy milk",
        "description": "2% milk",
        "priority": 3,
        "complete": false
    })
}

pub fn buy_oat_milk() -> Value {
    json!({
        "title": "Buy oat milk",
        "description": "oat",
        "priority": 2,
        "complete": true
    })
}
