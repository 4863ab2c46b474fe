//! Shared seeding helpers for the database-backed tests.

use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use billhub_core::config::ListingConfig;
use billhub_core::types::{ClientId, CompanyId};
use billhub_database::migration::run_migrations;
use billhub_database::repositories::ClientRepository;

/// Soft-delete state to seed a client in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeded {
    Active,
    Archived,
    Deleted,
}

/// A migrated database plus the pool used to seed it.
pub struct TestDb {
    pub pool: PgPool,
}

impl TestDb {
    /// Connect to `DATABASE_URL` and apply the schema, or `None` when unset.
    pub async fn connect() -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping database test");
            return None;
        };
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&url)
            .await
            .expect("Failed to connect to test database");
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        Some(Self { pool })
    }

    pub fn repository(&self) -> ClientRepository {
        ClientRepository::new(self.pool.clone(), ListingConfig::default())
    }

    /// Insert a fresh tenant. Each test seeds its own so runs stay isolated.
    pub async fn company(&self, currency_id: Option<i64>, country_id: Option<i64>) -> CompanyId {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO companies (name, currency_id, country_id) VALUES ('Acme', $1, $2) RETURNING id",
        )
        .bind(currency_id)
        .bind(country_id)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to insert company");
        CompanyId(id)
    }

    /// Insert a client with a live primary contact named after it.
    pub async fn client(
        &self,
        company: CompanyId,
        name: &str,
        balance: Decimal,
        state: Seeded,
    ) -> ClientId {
        let id = self.bare_client(company, name, balance, state).await;
        self.contact(company, id, Some(name), Some("Contact"), true, false)
            .await;
        id
    }

    /// Insert a client row without any contact.
    pub async fn bare_client(
        &self,
        company: CompanyId,
        name: &str,
        balance: Decimal,
        state: Seeded,
    ) -> ClientId {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO clients (company_id, name, id_number, balance, deleted_at, is_deleted) \
             VALUES ($1, $2, $3, $4, CASE WHEN $5::boolean THEN NOW() END, $6) RETURNING id",
        )
        .bind(company.0)
        .bind(name)
        .bind(format!("ID-{name}"))
        .bind(balance)
        .bind(state != Seeded::Active)
        .bind(state == Seeded::Deleted)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to insert client");
        ClientId(id)
    }

    pub async fn contact(
        &self,
        company: CompanyId,
        client: ClientId,
        first_name: Option<&str>,
        last_name: Option<&str>,
        is_primary: bool,
        deleted: bool,
    ) {
        sqlx::query(
            "INSERT INTO client_contacts \
             (company_id, client_id, first_name, last_name, email, is_primary, deleted_at) \
             VALUES ($1, $2, $3, $4, $5, $6, CASE WHEN $7::boolean THEN NOW() END)",
        )
        .bind(company.0)
        .bind(client.0)
        .bind(first_name)
        .bind(last_name)
        .bind(first_name.map(|f| format!("{}@example.com", f.to_lowercase())))
        .bind(is_primary)
        .bind(deleted)
        .execute(&self.pool)
        .await
        .expect("Failed to insert contact");
    }

    pub async fn set_client_country(&self, client: ClientId, country_id: i64) {
        sqlx::query("UPDATE clients SET country_id = $1 WHERE id = $2")
            .bind(country_id)
            .bind(client.0)
            .execute(&self.pool)
            .await
            .expect("Failed to update client");
    }
}
