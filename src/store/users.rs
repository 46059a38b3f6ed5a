use super::collection::JsonCollection;
use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::model::User;

/// Flat-file store for user accounts.
///
/// `save_user` enforces username and email uniqueness by scanning the
/// existing collection before appending. The check and the append are not
/// atomic against concurrent writers; the single-writer deployment model
/// makes that acceptable.
pub struct UserStore {
    collection: JsonCollection<User>,
}

impl UserStore {
    pub fn open(config: &StorageConfig) -> Result<Self> {
        Ok(Self {
            collection: JsonCollection::open(config.users_file())?,
        })
    }

    pub fn load_all(&self) -> Vec<User> {
        self.collection.load_all()
    }

    /// Appends a new user after checking uniqueness. Username is checked
    /// before email for each existing record; the first collision wins.
    pub fn save_user(&self, user: User) -> Result<User> {
        let mut users = self.collection.load_all();
        for existing in &users {
            if existing.username == user.username {
                return Err(Error::UsernameTaken);
            }
            if existing.email == user.email {
                return Err(Error::EmailTaken);
            }
        }
        users.push(user.clone());
        self.collection.save_all(&users)?;
        Ok(user)
    }

    pub fn get_by_username(&self, username: &str) -> Option<User> {
        self.collection
            .load_all()
            .into_iter()
            .find(|user| user.username == username)
    }

    pub fn get_by_email(&self, email: &str) -> Option<User> {
        self.collection
            .load_all()
            .into_iter()
            .find(|user| user.email == email)
    }

    pub fn get_by_id(&self, id: &str) -> Option<User> {
        self.collection
            .load_all()
            .into_iter()
            .find(|user| user.id == id)
    }

    /// Replaces the stored hash for `user_id` and rewrites the collection.
    pub fn update_password(&self, user_id: &str, new_hash: &str) -> Result<()> {
        let mut users = self.collection.load_all();
        let Some(user) = users.iter_mut().find(|user| user.id == user_id) else {
            return Err(Error::UserNotFound);
        };
        user.password_hash = new_hash.to_string();
        self.collection.save_all(&users)?;
        Ok(())
    }
}
