//! DDD Micro Core - Shared types library.
//!
//! This crate provides the data vocabulary shared by every DDD Micro client component:
//! - `client` - HTTP service façades for the user, product, basket and payment APIs
//! - `cli` - Command-line front end over those services
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
