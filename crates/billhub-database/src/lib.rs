//! # billhub-database
//!
//! PostgreSQL connection management, the composable client listing
//! filters, and the repository that executes them.

pub mod connection;
pub mod filters;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use filters::{ClientFilters, ClientListParams, SelectQuery};
