//! Projected client row returned by the client listing query.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use billhub_core::types::{ClientId, UserId};

use super::status::RecordStatus;

/// One row of the client list: the client joined to its primary contact,
/// with currency and country falling back to the owning company.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClientListRow {
    /// Client currency, or the company currency when unset.
    pub currency_id: Option<i64>,
    /// Client country, or the company country when unset.
    pub country_id: Option<i64>,
    /// Primary contact full name (`first last`).
    pub contact: String,
    pub id: ClientId,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub private_notes: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Outstanding balance.
    pub balance: Decimal,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub client_created_at: DateTime<Utc>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    /// User assigned to this client.
    pub user_id: Option<UserId>,
    pub id_number: Option<String>,
}

impl ClientListRow {
    /// Soft-delete status of the client.
    pub fn status(&self) -> RecordStatus {
        RecordStatus::classify(self.deleted_at.is_some(), self.is_deleted)
    }

    /// Name to show in listings: the client name, else the contact name.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.contact.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ClientListRow {
        let now = Utc::now();
        ClientListRow {
            currency_id: Some(1),
            country_id: None,
            contact: "Ada Lovelace".to_string(),
            id: ClientId(9),
            name: Some("  ".to_string()),
            private_notes: Some("owes us lunch".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            balance: Decimal::new(12_550, 2),
            last_login: None,
            created_at: now,
            client_created_at: now,
            phone: None,
            email: Some("ada@example.com".to_string()),
            deleted_at: None,
            is_deleted: false,
            user_id: None,
            id_number: None,
        }
    }

    #[test]
    fn test_display_name_falls_back_to_contact() {
        let mut r = row();
        assert_eq!(r.display_name(), "Ada Lovelace");
        r.name = Some("Analytical Engines Ltd".to_string());
        assert_eq!(r.display_name(), "Analytical Engines Ltd");
    }

    #[test]
    fn test_status_and_serialization() {
        let mut r = row();
        assert_eq!(r.status(), RecordStatus::Active);
        r.deleted_at = Some(Utc::now());
        assert_eq!(r.status(), RecordStatus::Archived);

        let json = serde_json::to_value(&r).expect("serialize");
        assert!(json.get("private_notes").is_none());
        assert_eq!(json["id"], 9);
    }
}
