use std::ops::{Deref, DerefMut};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::app::AppState;
use crate::database::TodoSession;
use crate::error::ApiError;

/// Database session scoped to one request. Acquired before the handler
/// body runs and handed back to the store when dropped, whichever way the
/// handler exits.
pub struct DbSession(Box<dyn TodoSession>);

#[async_trait]
impl FromRequestParts<AppState> for DbSession {
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = state.store.session().await?;
        tracing::trace!("Acquired {} session", state.store.backend());
        Ok(DbSession(session))
    }
}

impl Deref for DbSession {
    type Target = dyn TodoSession;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        tracing::trace!("Released database session");
    }
}
