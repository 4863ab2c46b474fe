//! Query-string parameters accepted by the client list.

use serde::{Deserialize, Serialize};

/// Raw filter tokens for a client list request.
///
/// Every token is optional; an absent or empty token applies no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientListParams {
    /// Free-text search, e.g. `acme`.
    pub filter: Option<String>,
    /// Comma separated statuses, e.g. `active,archived`.
    pub status: Option<String>,
    /// Balance comparison, e.g. `gt:100`.
    pub balance: Option<String>,
    /// Inclusive balance range, e.g. `10:50`.
    pub between_balance: Option<String>,
    /// Sort column and direction, e.g. `name|asc`.
    pub sort: Option<String>,
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Rows per page.
    pub per_page: Option<u64>,
}
