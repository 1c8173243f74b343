//! Social graph: mirrored follower/following edge sets.

use uuid::Uuid;

use super::MemoryStore;
use crate::errors::ApiError;
use crate::models::User;

impl MemoryStore {
    /// Record a follow edge.
    ///
    /// Both sides of the edge are written in this one operation: the target
    /// gains a follower and the follower gains a following entry. Updating
    /// only one side would break the mirror invariant that `followers` and
    /// `following` are views of the same edge set.
    pub fn follow(&self, follower_id: Uuid, target_id: Uuid) -> Result<(), ApiError> {
        if follower_id == target_id {
            return Err(ApiError::SelfFollow);
        }
        if !self.users.contains_key(&follower_id) {
            return Err(ApiError::NotFound("User"));
        }

        {
            let mut target = self
                .users
                .get_mut(&target_id)
                .ok_or(ApiError::NotFound("User"))?;
            if !target.followers.insert(follower_id) {
                return Err(ApiError::AlreadyFollowing);
            }
        }

        // The target guard is dropped before taking the follower's, so two
        // concurrent follows in opposite directions cannot deadlock.
        if let Some(mut follower) = self.users.get_mut(&follower_id) {
            follower.following.insert(target_id);
        }

        Ok(())
    }

    pub fn followers(&self, user_id: Uuid) -> Result<Vec<User>, ApiError> {
        let user = self.user(user_id).ok_or(ApiError::NotFound("User"))?;
        Ok(user
            .followers
            .iter()
            .filter_map(|id| self.user(*id))
            .collect())
    }

    pub fn following(&self, user_id: Uuid) -> Result<Vec<User>, ApiError> {
        let user = self.user(user_id).ok_or(ApiError::NotFound("User"))?;
        Ok(user
            .following
            .iter()
            .filter_map(|id| self.user(*id))
            .collect())
    }
}
