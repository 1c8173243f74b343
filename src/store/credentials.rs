//! Credential store: username/password-hash pairs and user records.

use std::collections::HashSet;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::MemoryStore;
use crate::errors::ApiError;
use crate::models::User;

impl MemoryStore {
    /// Create a user with an already-hashed password.
    ///
    /// Uniqueness is enforced through the username index entry, which holds
    /// its shard lock for the duration of the insert, so two concurrent
    /// sign-ups for the same name cannot both succeed.
    pub fn create_user(&self, username: &str, password_hash: String) -> Result<User, ApiError> {
        match self.username_index.entry(username.to_string()) {
            Entry::Occupied(_) => Err(ApiError::UsernameTaken),
            Entry::Vacant(slot) => {
                let user = User {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    password_hash,
                    profile_pic: None,
                    followers: HashSet::new(),
                    following: HashSet::new(),
                    created_at: Utc::now().timestamp(),
                    seq: self.next_user_seq(),
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    /// Check a plaintext password against the stored hash. Unknown user and
    /// wrong password collapse into the same `None` so callers cannot leak
    /// the difference.
    pub fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ApiError> {
        let Some(user_id) = self.username_index.get(username).map(|id| *id) else {
            return Ok(None);
        };
        let Some(user) = self.user(user_id) else {
            return Ok(None);
        };

        let valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| ApiError::Store(format!("password verification failed: {e}")))?;

        Ok(valid.then_some(user))
    }

    pub fn user(&self, user_id: Uuid) -> Option<User> {
        self.users.get(&user_id).map(|u| u.clone())
    }

    pub fn user_by_username(&self, username: &str) -> Option<User> {
        let user_id = self.username_index.get(username).map(|id| *id)?;
        self.user(user_id)
    }

    /// All users in sign-up order.
    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|u| u.seq);
        users
    }

    /// Record the stored-file reference for a user's profile picture. The
    /// binary itself is written elsewhere.
    pub fn set_profile_pic(&self, user_id: Uuid, reference: String) -> Result<(), ApiError> {
        let mut user = self.users.get_mut(&user_id).ok_or(ApiError::NotFound("User"))?;
        user.profile_pic = Some(reference);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::open("memory://").unwrap()
    }

    // Low cost keeps the hashing tests fast; production paths use
    // bcrypt::DEFAULT_COST.
    fn hash(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    #[test]
    fn stored_hash_differs_from_plaintext() {
        let store = store();
        let user = store.create_user("alice", hash("pw123")).unwrap();
        assert_ne!(user.password_hash, "pw123");

        let stored = store.user_by_username("alice").unwrap();
        assert_ne!(stored.password_hash, "pw123");
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let store = store();
        store.create_user("alice", hash("pw123")).unwrap();
        let err = store.create_user("alice", hash("other")).unwrap_err();
        assert!(matches!(err, ApiError::UsernameTaken));
        assert_eq!(store.list_users().len(), 1);
    }

    #[test]
    fn verify_accepts_correct_password() {
        let store = store();
        store.create_user("alice", hash("pw123")).unwrap();
        let user = store.verify_credentials("alice", "pw123").unwrap();
        assert_eq!(user.unwrap().username, "alice");
    }

    #[test]
    fn verify_rejects_wrong_password_and_unknown_user_alike() {
        let store = store();
        store.create_user("alice", hash("pw123")).unwrap();
        assert!(store.verify_credentials("alice", "wrong").unwrap().is_none());
        assert!(store.verify_credentials("nobody", "pw123").unwrap().is_none());
    }

    #[test]
    fn list_users_keeps_signup_order() {
        let store = store();
        store.create_user("alice", hash("a")).unwrap();
        store.create_user("bob", hash("b")).unwrap();
        store.create_user("carol", hash("c")).unwrap();

        let names: Vec<String> = store.list_users().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn set_profile_pic_records_reference() {
        let store = store();
        let user = store.create_user("alice", hash("pw123")).unwrap();
        store
            .set_profile_pic(user.id, "/uploads/123-me.png".to_string())
            .unwrap();
        assert_eq!(
            store.user(user.id).unwrap().profile_pic.as_deref(),
            Some("/uploads/123-me.png")
        );
    }

    #[test]
    fn set_profile_pic_unknown_user_is_not_found() {
        let store = store();
        let err = store
            .set_profile_pic(Uuid::new_v4(), "/uploads/x.png".to_string())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound("User")));
    }
}
