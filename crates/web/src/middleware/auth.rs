//! Authentication extractors and session helpers.
//!
//! The session only stores the user's ID. `RequireAuth` loads the user on
//! every protected request, so a deleted or renamed account is picked up
//! immediately.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::{Expiry, Session};

use bistro_core::UserId;

use super::flash::push_flash;
use super::session::REMEMBER_EXPIRY_SECONDS;
use crate::models::{FlashLevel, User, session_keys};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Message flashed when a protected page is requested without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

/// Extractor that requires a logged-in user.
///
/// If there is no valid session, the visitor is redirected to the login
/// page with the requested path as the `next` parameter.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.fullname)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Rejection returned by [`RequireAuth`].
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page, returning to `next` afterwards.
    RedirectToLogin { next: String },
    /// The session layer is missing or the user lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { next } => {
                Redirect::to(&login_redirect_target(&next)).into_response()
            }
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Login URL that returns to `next` after authenticating.
#[must_use]
pub fn login_redirect_target(next: &str) -> String {
    format!("/login?next={}", urlencoding::encode(next))
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::Internal)?;

        let next = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_owned(), ToString::to_string);

        let user_id: Option<UserId> = session.get(session_keys::USER_ID).await.ok().flatten();

        let user = match user_id {
            Some(id) => AuthService::new(state.pool(), None)
                .get_user(id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Failed to load session user");
                    AuthRejection::Internal
                })?,
            None => None,
        };

        let Some(user) = user else {
            if user_id.is_some() {
                tracing::info!("Session refers to a missing user, clearing it");
                if let Err(e) = session.remove::<UserId>(session_keys::USER_ID).await {
                    tracing::warn!(error = %e, "Failed to clear stale session user");
                }
            }
            push_flash(&session, FlashLevel::Info, LOGIN_REQUIRED_MESSAGE).await;
            return Err(AuthRejection::RedirectToLogin { next });
        };

        tracing::Span::current().record("user_id", user.id.as_i64());

        Ok(Self(user))
    }
}

/// Extractor that reports whether a user is logged in, without loading them.
///
/// Used by public pages to choose the navigation links.
pub struct OptionalAuth(pub Option<UserId>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<UserId>(session_keys::USER_ID)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user_id))
    }
}

/// Log `user_id` in on this session.
///
/// The session ID is rotated. With `remember` the session survives browser
/// restarts for [`REMEMBER_EXPIRY_SECONDS`] of inactivity; otherwise it
/// ends with the browser session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn start_user_session(
    session: &Session,
    user_id: UserId,
    remember: bool,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::USER_ID, user_id).await?;
    session.set_expiry(Some(if remember {
        Expiry::OnInactivity(tower_sessions::cookie::time::Duration::seconds(
            REMEMBER_EXPIRY_SECONDS,
        ))
    } else {
        Expiry::OnSessionEnd
    }));
    Ok(())
}

/// Destroy the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be deleted from the store.
pub async fn end_user_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_target_encodes_next() {
        assert_eq!(login_redirect_target("/orders"), "/login?next=%2Forders");
        assert_eq!(
            login_redirect_target("/order?x=1&y=2"),
            "/login?next=%2Forder%3Fx%3D1%26y%3D2"
        );
    }

    #[test]
    fn test_redirect_rejection_points_at_login() {
        let response = AuthRejection::RedirectToLogin {
            next: "/profile".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/login?next=%2Fprofile"
        );
    }
}
