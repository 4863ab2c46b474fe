//! Composable query filters for list endpoints.

pub mod client;
pub mod params;
pub mod predicate;
pub mod query;
pub mod status;

pub use client::ClientFilters;
pub use params::ClientListParams;
pub use predicate::{BindValue, Predicate};
pub use query::{OrderTerm, SelectQuery};
