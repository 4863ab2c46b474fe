//! Client listing configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Defaults applied when listing clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Sort token applied when the request carries none, formatted as `column|direction`.
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Page size used when the request carries none.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for a requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl ListingConfig {
    /// Reject page size bounds that cannot produce a page.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_page_size == 0 {
            return Err(AppError::configuration(
                "listing.max_page_size must be greater than zero",
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(AppError::configuration(format!(
                "listing.default_page_size must be between 1 and {}",
                self.max_page_size
            )));
        }
        Ok(())
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_sort() -> String {
    "name|asc".to_string()
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}
