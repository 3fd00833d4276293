//! Clipjoint Core - Shared types library.
//!
//! This crate provides common types used across all Clipjoint components:
//! - `client` - Booking API client library
//! - `cli` - Command-line frontend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
