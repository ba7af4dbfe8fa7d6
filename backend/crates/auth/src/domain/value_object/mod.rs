//! Value Object Module

pub mod banned_terms;
pub mod secret;
pub mod user_record_id;
pub mod username;
pub mod validation_pair;
