//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::User;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all users ordered by username
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user ORDER BY username")
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user; usernames are unique
    ///
    /// The password hash is bound explicitly: `hash_pass` is never part of
    /// the model's serialized form.
    pub async fn create(&self, user: User) -> RepoResult<User> {
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    full_name = $full_name,
                    username = $username,
                    hash_pass = $hash_pass,
                    role = $role,
                    is_active = $is_active,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("full_name", user.full_name))
            .bind(("username", user.username))
            .bind(("hash_pass", user.hash_pass))
            .bind(("role", user.role))
            .bind(("is_active", user.is_active))
            .bind(("created_at", user.created_at))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user; the hash must already be computed by the caller
    pub async fn update(&self, id: &str, user: User) -> RepoResult<User> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        self.base
            .db()
            .query(
                "UPDATE $thing SET full_name = $full_name, hash_pass = $hash_pass, \
                 role = $role, is_active = $is_active",
            )
            .bind(("thing", thing))
            .bind(("full_name", user.full_name))
            .bind(("hash_pass", user.hash_pass))
            .bind(("role", user.role))
            .bind(("is_active", user.is_active))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
