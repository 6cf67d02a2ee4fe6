use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, http::HeaderValue, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::TodoStore;
use crate::handlers::{health, todos};

/// Shared by every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, security: SecurityConfig) -> Self {
        Self {
            store,
            security: Arc::new(security),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(health::root))
        .route("/health", get(health::health))
        // Authenticated
        .nest("/items", todo_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
        );

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }

    router.with_state(state)
}

fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/:todo_id",
            get(todos::get).put(todos::update).delete(todos::delete),
        )
}

/// Permissive when no origins are configured
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
