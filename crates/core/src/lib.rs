//! FreshCart Core - Shared types library.
//!
//! This crate provides common types used across the FreshCart components:
//! - `client` - Session, cart synchronization, and API gateway library
//! - `cli` - Command-line storefront client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no durable
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, validated emails and passwords, and the cart
//!   and catalog data model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
