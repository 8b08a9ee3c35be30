use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct User {
    /// Assigned at creation, immutable
    pub id: Uuid,
    /// Unique lookup key, exact match, case-sensitive
    pub username: String,
    /// bcrypt hash, never serialized into responses
    pub password_hash: String,
    /// Movie references, insertion order preserved, no duplicates
    pub favourites: Vec<Uuid>,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            favourites: Vec::new(),
        }
    }
}

/// API representation of a user. Strips the password hash.
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub favourites: Vec<Uuid>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            favourites: user.favourites.clone(),
        }
    }
}
