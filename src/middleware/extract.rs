use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};

use crate::database::models::TodoRequest;
use crate::error::{ApiError, FieldErrors};

/// `{todo_id}` path segment; must be a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::invalid_field("todo_id", rejection.body_text()))?;

        parse_todo_id(&raw).map(TodoId)
    }
}

fn parse_todo_id(raw: &str) -> Result<i64, ApiError> {
    let id: i64 = raw
        .parse()
        .map_err(|_| ApiError::invalid_field("todo_id", "must be an integer"))?;
    if id <= 0 {
        return Err(ApiError::invalid_field("todo_id", "must be greater than 0"));
    }
    Ok(id)
}

/// JSON body for POST/PUT that has already passed field validation.
/// Malformed JSON, missing fields and constraint violations are all 422.
#[derive(Debug, Clone)]
pub struct TodoPayload(pub TodoRequest);

#[async_trait]
impl<S> FromRequest<S> for TodoPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<TodoRequest>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::unprocessable_entity(rejection.body_text(), FieldErrors::new()))?;

        payload
            .validate()
            .map_err(|field_errors| ApiError::unprocessable_entity("Validation failed", field_errors))?;

        Ok(TodoPayload(payload))
    }
}
