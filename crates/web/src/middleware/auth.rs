//! Admin gate extractor.
//!
//! The console is protected by a single shared password (see `config`); a
//! successful login sets one boolean flag in the server-side session and
//! nothing else. There are no accounts, no roles beyond "admin or not",
//! and no way to revoke a single operator short of rotating the password.
//! That is the whole security model, stated plainly so nobody mistakes it
//! for more.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Session keys used by the admin gate.
pub mod session_keys {
    /// Boolean flag set after a successful password check.
    pub const ADMIN_AUTHENTICATED: &str = "admin_authenticated";
}

/// Extractor that requires an authenticated admin session.
///
/// If the flag is not set, the request is redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_: RequireAdmin) -> impl IntoResponse {
///     "only admins see this"
/// }
/// ```
pub struct RequireAdmin;

/// Rejection returned when the admin flag is missing: redirect to login.
pub struct RedirectToLogin;

impl IntoResponse for RedirectToLogin {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = RedirectToLogin;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(RedirectToLogin)?;

        let authenticated: bool = session
            .get(session_keys::ADMIN_AUTHENTICATED)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if authenticated {
            Ok(Self)
        } else {
            Err(RedirectToLogin)
        }
    }
}
