//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (CSPRNG strings, SHA-256, log-safe fingerprints)
//! - Line-oriented `KEY=VALUE` file storage

pub mod crypto;
pub mod kv_file;
