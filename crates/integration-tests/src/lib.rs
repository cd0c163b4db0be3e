//! Integration tests for Haberdash.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p haberdash-cli -- migrate
//!
//! # Start the server
//! cargo run -p haberdash-web
//!
//! # Run integration tests (they are #[ignore]d by default)
//! cargo test -p haberdash-integration-tests -- --ignored
//! ```
//!
//! Tests target a running server via `HABERDASH_BASE_URL` (default
//! `http://localhost:3000`) and log in with `HABERDASH_ADMIN_PASSWORD`.
