use crate::models::user::User;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// Store-level failure when creating or renaming a user
#[derive(Debug, PartialEq, Eq)]
pub enum CreateError {
    UsernameTaken,
}

/// Store-level outcome of a favourites mutation
#[derive(Debug, PartialEq, Eq)]
pub enum FavouriteError {
    UserMissing,
    AlreadyPresent,
    NotPresent,
}

/// In-memory store for user records, keyed by username.
///
/// Username uniqueness is enforced here, not by callers. Favourites
/// mutations run under the entry's exclusive shard guard, so the
/// membership check and the write are a single atomic step: two
/// concurrent adds of the same (user, movie) pair yield exactly one
/// success and one `AlreadyPresent`.
pub struct UserStore {
    users: DashMap<String, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    /// Create a user with the given username and password hash.
    /// Fails if the username is already taken.
    pub fn create(&self, username: &str, password_hash: String) -> Result<User, CreateError> {
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(CreateError::UsernameTaken),
            Entry::Vacant(vacant) => {
                let user = User::new(username.to_string(), password_hash);
                vacant.insert(user.clone());
                Ok(user)
            }
        }
    }

    /// Look up a user by exact username match
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|entry| entry.value().clone())
    }

    /// Look up a user by id
    /// Note: This is a linear search and should be used sparingly
    pub fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.value().id == id)
            .map(|entry| entry.value().clone())
    }

    pub fn list_all(&self) -> Vec<User> {
        self.users.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Delete a user by id. Returns false if no user had that id.
    pub fn delete_by_id(&self, id: Uuid) -> bool {
        let username = match self.find_by_id(id) {
            Some(user) => user.username,
            None => return false,
        };
        self.users.remove(&username).is_some()
    }

    /// Apply a partial update to the user with the given id. The id itself
    /// is immutable. Returns `Ok(None)` if no such user exists.
    ///
    /// A rename moves the record to its new key; the uniqueness check and
    /// the move are not a single atomic step, which is acceptable for this
    /// administrative path.
    pub fn update(
        &self,
        id: Uuid,
        new_username: Option<String>,
        new_password_hash: Option<String>,
    ) -> Result<Option<User>, CreateError> {
        let current = match self.find_by_id(id) {
            Some(user) => user,
            None => return Ok(None),
        };

        match new_username {
            Some(ref username) if *username != current.username => {
                if self.users.contains_key(username) {
                    return Err(CreateError::UsernameTaken);
                }
                let (_, mut user) = match self.users.remove(&current.username) {
                    Some(pair) => pair,
                    None => return Ok(None),
                };
                user.username = username.clone();
                if let Some(hash) = new_password_hash {
                    user.password_hash = hash;
                }
                self.users.insert(username.clone(), user.clone());
                Ok(Some(user))
            }
            _ => {
                let mut entry = match self.users.get_mut(&current.username) {
                    Some(entry) => entry,
                    None => return Ok(None),
                };
                if let Some(hash) = new_password_hash {
                    entry.password_hash = hash;
                }
                Ok(Some(entry.clone()))
            }
        }
    }

    /// Atomically add a movie reference to a user's favourites.
    /// Returns the updated user on success.
    pub fn add_favourite(&self, username: &str, movie_id: Uuid) -> Result<User, FavouriteError> {
        let mut entry = self
            .users
            .get_mut(username)
            .ok_or(FavouriteError::UserMissing)?;

        if entry.favourites.contains(&movie_id) {
            return Err(FavouriteError::AlreadyPresent);
        }

        entry.favourites.push(movie_id);
        Ok(entry.value().clone())
    }

    /// Atomically remove a movie reference from a user's favourites
    pub fn remove_favourite(&self, username: &str, movie_id: Uuid) -> Result<(), FavouriteError> {
        let mut entry = self
            .users
            .get_mut(username)
            .ok_or(FavouriteError::UserMissing)?;

        let position = entry
            .favourites
            .iter()
            .position(|id| *id == movie_id)
            .ok_or(FavouriteError::NotPresent)?;

        entry.favourites.remove(position);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
