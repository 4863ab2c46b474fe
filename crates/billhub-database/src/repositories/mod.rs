//! Repository implementations for BillHub entities.

pub mod client;

pub use client::ClientRepository;
