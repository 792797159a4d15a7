//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// User ID type
pub type UserId = RecordId;

/// Back-office user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub full_name: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    /// "admin" or "staff"
    pub role: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Unix timestamp in milliseconds
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserRegister {
    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: String,
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Defaults to "staff" when omitted
    pub role: Option<String>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = User::hash_password("admin123").expect("hashing failed");
        let user = User {
            id: None,
            full_name: "Main Administrator".to_string(),
            username: "admin".to_string(),
            hash_pass: hash,
            role: "admin".to_string(),
            is_active: true,
            created_at: 0,
        };

        assert!(user.verify_password("admin123").unwrap());
        assert!(!user.verify_password("wrong-password").unwrap());
    }

    #[test]
    fn test_password_hash_is_salted() {
        let h1 = User::hash_password("secret1").unwrap();
        let h2 = User::hash_password("secret1").unwrap();
        assert_ne!(h1, h2);
    }
}
