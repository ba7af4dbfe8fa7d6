//! User Record Entity
//!
//! The stored `{username, token}` pair. Its presence, looked up by token,
//! is what makes a well-signed token live; deleting it revokes the token.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    user_record_id::UserRecordId, username::Username, validation_pair::ValidationPair,
};

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: UserRecordId,
    /// Unique, case-insensitive
    pub username: Username,
    /// Unique; the lookup key of the auth middleware
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(username: Username, token: String) -> Self {
        Self {
            user_id: UserRecordId::new(),
            username,
            token,
            created_at: Utc::now(),
        }
    }

    /// Identity handed to downstream handlers
    pub fn identity(&self) -> ValidationPair {
        ValidationPair::new(self.username.as_str(), self.token.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_uses_stored_fields() {
        let record = UserRecord::new(Username::from_db("Alice"), "tok".to_string());
        let identity = record.identity();
        assert_eq!(identity.username, "Alice");
        assert_eq!(identity.token, "tok");
    }
}
