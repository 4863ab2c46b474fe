//! Client listing against a live PostgreSQL database.
//!
//! Set `DATABASE_URL` to a disposable database to run these; without it
//! every test returns early.

mod client_list_test;
mod helpers;
