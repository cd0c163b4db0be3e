//! Haberdash Core - Shared types and catalog filtering.
//!
//! This crate provides the common vocabulary used across all Haberdash
//! components:
//! - `web` - Public catalog pages and the admin console
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere, including in tests that never touch the network.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the product data model
//! - [`filter`] - Pure visibility filtering over product lists

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod filter;
pub mod types;

pub use types::*;
