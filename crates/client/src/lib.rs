//! FreshCart client library.
//!
//! A typed client for the Route e-commerce REST API: authentication flows,
//! a durable client-side session, server-authoritative cart synchronization,
//! and read-only catalog browsing.
//!
//! # Architecture
//!
//! - The remote API is the source of truth for the cart; every mutation is a
//!   round trip whose response replaces local state. No quantity or total is
//!   ever computed locally.
//! - The session (auth token + user profile) lives in memory and is mirrored
//!   to a durable key-value store so it survives process restarts.
//! - The services are explicit injectable values constructed once at process
//!   start and passed by handle to consumers; there are no hidden globals.
//!
//! # Modules
//!
//! - [`gateway`] - REST API client (`reqwest`) and wire types
//! - [`session`] - Persisted session store and session manager
//! - [`cart`] - Cart synchronizer with per-line response ordering
//! - [`guard`] - Route guard decision for protected destinations
//! - [`forms`] - Pre-network validation for the auth flows
//! - [`config`] - Environment-based configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod session;
