//! Authentication route handlers.
//!
//! Handles signup, login and logout against the local `users` table.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::{AFTER_LOGIN_PATH, Page};
use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    Flashes, OptionalAuth, RequireAuth, end_user_session, push_flash, start_user_session,
};
use crate::models::{FlashLevel, User};
use crate::services::auth::{AuthError, AuthService, Registration};
use crate::state::AppState;

pub const SIGNUP_CONFLICT_MESSAGE: &str = "Email already exists or password incorrect.";
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub const EMPTY_PASSWORD_MESSAGE: &str = "Please choose a password.";

// =============================================================================
// Form Types
// =============================================================================

/// Signup form data. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Checkbox; present when ticked.
    pub remember: Option<String>,
}

/// Return path after login.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub page: Page,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: Page,
    /// Form action, carrying the `next` parameter through.
    pub action: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Accept `next` only if it is a path on this site.
///
/// Rejects absolute and scheme-relative URLs so the login form cannot be
/// used as an open redirect. Control characters are refused since they
/// cannot appear in a `Location` header.
#[must_use]
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|path| {
        path.starts_with('/')
            && !path.starts_with("//")
            && !path.contains('\\')
            && !path.chars().any(char::is_control)
    })
}

fn login_action(next: Option<&str>) -> String {
    safe_next(next).map_or_else(
        || "/login".to_string(),
        |path| format!("/login?next={}", urlencoding::encode(path)),
    )
}

/// Log `user` in on this session and note them in Sentry.
async fn establish_session(
    session: &Session,
    user: &User,
    remember: bool,
) -> Result<(), AppError> {
    start_user_session(session, user.id, remember).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page(
    OptionalAuth(user_id): OptionalAuth,
    Flashes(flashes): Flashes,
) -> impl IntoResponse {
    SignupTemplate {
        page: Page::new(user_id.is_some(), flashes),
    }
}

/// Handle signup form submission.
///
/// A new account is logged in straight away. Validation failures flash a
/// message and return to the signup page.
///
/// # Errors
///
/// Returns `AppError` if the database or session store fails.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool(), state.bootstrap_email());

    let registration = match auth.signup(&form.fullname, &form.email, &form.password).await {
        Ok(registration) => registration,
        Err(e) if e.is_user_facing() => {
            tracing::info!(error = %e, "Signup rejected");
            let message = match e {
                AuthError::InvalidEmail(_) => INVALID_EMAIL_MESSAGE,
                AuthError::WeakPassword(_) => EMPTY_PASSWORD_MESSAGE,
                _ => SIGNUP_CONFLICT_MESSAGE,
            };
            push_flash(&session, FlashLevel::Error, message).await;
            return Ok(Redirect::to("/signup").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    if let Registration::Created(user) = &registration {
        tracing::info!(user_id = %user.id, "Account created");
    }

    establish_session(&session, registration.user(), false).await?;
    Ok(Redirect::to(AFTER_LOGIN_PATH).into_response())
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(
    OptionalAuth(user_id): OptionalAuth,
    Flashes(flashes): Flashes,
    Query(query): Query<NextQuery>,
) -> impl IntoResponse {
    LoginTemplate {
        page: Page::new(user_id.is_some(), flashes),
        action: login_action(query.next.as_deref()),
    }
}

/// Handle login form submission.
///
/// On success, redirects to `next` when it is a local path, otherwise to
/// the order page.
///
/// # Errors
///
/// Returns `AppError` if the database or session store fails.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool(), state.bootstrap_email());

    let user = match auth.login(&form.email, &form.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login failed");
            push_flash(&session, FlashLevel::Error, INVALID_LOGIN_MESSAGE).await;
            return Ok(Redirect::to(&login_action(query.next.as_deref())).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    establish_session(&session, &user, form.remember.is_some()).await?;
    tracing::info!(user_id = %user.id, "Logged in");

    let target = safe_next(query.next.as_deref()).unwrap_or(AFTER_LOGIN_PATH);
    Ok(Redirect::to(target).into_response())
}

/// Handle logout.
///
/// # Errors
///
/// Returns `AppError` if the session cannot be deleted.
pub async fn logout(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Redirect, AppError> {
    end_user_session(&session).await?;
    clear_sentry_user();
    tracing::info!(user_id = %user.id, "Logged out");
    Ok(Redirect::to("/"))
}
