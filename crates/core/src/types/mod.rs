//! Core types for the FreshCart client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod credential;
pub mod email;
pub mod id;
pub mod user;

pub use cart::{CartLine, CartSnapshot, ProductSummary};
pub use catalog::{Brand, Category, PageMetadata, Paginated, Product, Subcategory};
pub use credential::{Password, PasswordError};
pub use email::{Email, EmailError};
pub use id::*;
pub use user::UserProfile;
