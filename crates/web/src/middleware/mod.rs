//! HTTP middleware: the admin gate, sessions, and request correlation.

pub mod auth;
pub mod request_id;
pub mod session;

pub use session::create_session_layer;
