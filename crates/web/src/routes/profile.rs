//! Profile page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use super::Page;
use crate::error::Result;
use crate::filters;
use crate::middleware::{Flashes, RequireAuth, push_flash};
use crate::models::{FlashLevel, User};
use crate::routes::auth::INVALID_EMAIL_MESSAGE;
use crate::services::profile::{ProfileChanges, ProfileError, ProfileService};
use crate::state::AppState;

pub const EMAIL_TAKEN_MESSAGE: &str = "Email already in use.";
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully.";

/// Profile form data. An empty password keeps the current one.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub page: Page,
    pub user: User,
}

/// Display the profile form.
pub async fn profile_page(
    RequireAuth(user): RequireAuth,
    Flashes(flashes): Flashes,
) -> impl IntoResponse {
    ProfileTemplate {
        page: Page::new(true, flashes),
        user,
    }
}

/// Handle profile form submission.
///
/// # Errors
///
/// Returns `AppError` if the database fails.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect> {
    let changes = ProfileChanges {
        fullname: &form.fullname,
        email: &form.email,
        password: &form.password,
    };

    match ProfileService::new(state.pool()).update(&user, changes).await {
        Ok(_) => {
            push_flash(&session, FlashLevel::Success, PROFILE_UPDATED_MESSAGE).await;
        }
        Err(ProfileError::EmailTaken) => {
            push_flash(&session, FlashLevel::Error, EMAIL_TAKEN_MESSAGE).await;
        }
        Err(ProfileError::InvalidEmail(e)) => {
            tracing::info!(user_id = %user.id, error = %e, "Profile email rejected");
            push_flash(&session, FlashLevel::Error, INVALID_EMAIL_MESSAGE).await;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/profile"))
}
