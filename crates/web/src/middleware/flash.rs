//! One-shot flash messages carried across a redirect in the session.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{FlashLevel, FlashMessage, session_keys};

/// Queue a message for the next rendered page.
///
/// Failures are logged, not returned: a lost flash never fails a request.
pub async fn push_flash(session: &Session, level: FlashLevel, text: impl Into<String>) {
    let mut flashes: Vec<FlashMessage> = session
        .get(session_keys::FLASHES)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    flashes.push(FlashMessage {
        level,
        text: text.into(),
    });

    if let Err(e) = session.insert(session_keys::FLASHES, flashes).await {
        tracing::error!("Failed to store flash message: {}", e);
    }
}

/// Extractor that drains pending flash messages.
///
/// # Example
///
/// ```rust,ignore
/// async fn page(Flashes(flashes): Flashes) -> impl IntoResponse {
///     PageTemplate { flashes }
/// }
/// ```
pub struct Flashes(pub Vec<FlashMessage>);

impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flashes = match parts.extensions.get::<Session>() {
            Some(session) => session
                .remove::<Vec<FlashMessage>>(session_keys::FLASHES)
                .await
                .ok()
                .flatten()
                .unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(Self(flashes))
    }
}
