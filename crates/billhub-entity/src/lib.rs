//! # billhub-entity
//!
//! Domain entity models for BillHub. Database rows derive
//! `sqlx::FromRow` alongside `Serialize`/`Deserialize`.

pub mod client;
