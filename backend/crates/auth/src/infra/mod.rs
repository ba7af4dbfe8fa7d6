//! Infrastructure Layer
//!
//! Database implementations and file-backed configuration sources.

pub mod banned_terms_file;
pub mod memory;
pub mod postgres;
pub mod secret_file;

pub use banned_terms_file::load_banned_terms;
pub use memory::InMemoryUserRecordRepository;
pub use postgres::PgUserRecordRepository;
pub use secret_file::{FileSecretStore, SecretStoreError};
