//! # billhub-core
//!
//! Core crate for BillHub. Contains configuration schemas, typed
//! identifiers, pagination/sorting/comparison types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other BillHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
