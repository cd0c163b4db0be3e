//! Admin login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::filters;
use crate::middleware::auth::session_keys;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Display the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate { error: None }
}

/// Check the submitted password against the shared admin secret.
///
/// This is a plain string comparison against one shared password - the gate
/// keeps casual visitors out of the console and nothing more. The password
/// itself never leaves the server config, and startup validation rejects
/// placeholder or low-entropy values.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if form.password == state.config().admin_password.expose_secret() {
        session
            .insert(session_keys::ADMIN_AUTHENTICATED, true)
            .await?;
        tracing::info!("admin logged in");
        Ok(Redirect::to("/admin").into_response())
    } else {
        tracing::warn!("admin login rejected");
        Ok(LoginTemplate {
            error: Some("Wrong password".to_owned()),
        }
        .into_response())
    }
}

/// Clear the session and return to the catalog.
pub async fn logout(session: Session) -> Result<Redirect> {
    session.flush().await?;
    Ok(Redirect::to("/"))
}
