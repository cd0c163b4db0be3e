//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                             - Product list (category + search filter)
//! GET  /products/{record_id}         - Product detail
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (pings the database)
//!
//! # Auth
//! GET  /login                        - Admin login page
//! POST /login                        - Admin login action
//! POST /logout                       - Logout action
//!
//! # Admin (session-gated)
//! GET  /admin                        - Console: forms, categories, product grid
//! POST /admin/products               - Create product
//! POST /admin/products/{id}          - Update product
//! POST /admin/products/{id}/delete   - Delete product
//! POST /admin/categories             - Add category
//! POST /admin/categories/delete      - Remove category
//! ```

pub mod admin;
pub mod auth;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin console router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::panel))
        .route("/products", post(admin::create_product))
        .route("/products/{id}", post(admin::update_product))
        .route("/products/{id}/delete", post(admin::delete_product))
        .route("/categories", post(admin::add_category))
        .route("/categories/delete", post(admin::remove_category))
}

/// Create all routes for the web binary.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .nest("/admin", admin_routes())
}
