//! Feed store: posts, likes, comments.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use super::MemoryStore;
use crate::errors::ApiError;
use crate::models::{Comment, Post};

/// Result of a like attempt. A repeat like is reported, never failed.
#[derive(Debug)]
pub struct LikeOutcome {
    pub already_liked: bool,
    pub post: Post,
}

impl MemoryStore {
    pub fn create_post(&self, sender: Uuid, text: String) -> Result<Post, ApiError> {
        let post = Post {
            id: Uuid::new_v4(),
            text,
            sender,
            likes: 0,
            liked_by: HashSet::new(),
            comments: Vec::new(),
            created_at: Utc::now().timestamp(),
            seq: self.next_post_seq(),
        };
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    /// Full materialization in insertion order; no pagination.
    pub fn list_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|entry| entry.value().clone()).collect();
        posts.sort_by_key(|p| p.seq);
        posts
    }

    pub fn posts_by_author(&self, author: Uuid) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|entry| entry.value().sender == author)
            .map(|entry| entry.value().clone())
            .collect();
        posts.sort_by_key(|p| p.seq);
        posts
    }

    /// Idempotent like. The check and the update both run under the post
    /// entry's exclusive lock, so concurrent likers cannot double-count.
    pub fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeOutcome, ApiError> {
        let mut post = self.posts.get_mut(&post_id).ok_or(ApiError::NotFound("Post"))?;

        if !post.liked_by.insert(user_id) {
            return Ok(LikeOutcome {
                already_liked: true,
                post: post.clone(),
            });
        }

        post.likes += 1;
        Ok(LikeOutcome {
            already_liked: false,
            post: post.clone(),
        })
    }

    /// Append a comment with a server-assigned timestamp.
    pub fn add_comment(&self, post_id: Uuid, author: Uuid, text: String) -> Result<Post, ApiError> {
        let mut post = self.posts.get_mut(&post_id).ok_or(ApiError::NotFound("Post"))?;
        post.comments.push(Comment {
            user: author,
            text,
            created_at: Utc::now().timestamp(),
        });
        Ok(post.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_user() -> (MemoryStore, Uuid) {
        let store = MemoryStore::open("memory://").unwrap();
        let user = store
            .create_user("alice", bcrypt::hash("pw123", 4).unwrap())
            .unwrap();
        (store, user.id)
    }

    #[test]
    fn second_like_by_same_user_is_a_noop() {
        let (store, alice) = store_with_user();
        let post = store.create_post(alice, "hello".to_string()).unwrap();

        let first = store.like_post(post.id, alice).unwrap();
        assert!(!first.already_liked);
        assert_eq!(first.post.likes, 1);

        let second = store.like_post(post.id, alice).unwrap();
        assert!(second.already_liked);
        assert_eq!(second.post.likes, first.post.likes);
        assert_eq!(second.post.liked_by.len(), 1);
    }

    #[test]
    fn n_distinct_likers_count_exactly_n() {
        let (store, alice) = store_with_user();
        let post = store.create_post(alice, "hello".to_string()).unwrap();

        let likers: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        // Each liker hits the post twice, in interleaved order.
        for user in likers.iter().chain(likers.iter().rev()) {
            store.like_post(post.id, *user).unwrap();
        }

        let post = store.list_posts().pop().unwrap();
        assert_eq!(post.likes, 5);
        assert_eq!(post.liked_by.len(), 5);
    }

    #[test]
    fn like_unknown_post_is_not_found() {
        let (store, alice) = store_with_user();
        let err = store.like_post(Uuid::new_v4(), alice).unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Post")));
    }

    #[test]
    fn comments_append_in_order_and_keep_timestamps() {
        let (store, alice) = store_with_user();
        let post = store.create_post(alice, "hello".to_string()).unwrap();

        store.add_comment(post.id, alice, "first".to_string()).unwrap();
        let after_first = store.add_comment(post.id, alice, "second".to_string()).unwrap();
        assert_eq!(after_first.comments.len(), 2);

        let first_ts = after_first.comments[0].created_at;
        let updated = store.add_comment(post.id, alice, "third".to_string()).unwrap();

        assert_eq!(updated.comments.len(), 3);
        let texts: Vec<&str> = updated.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(updated.comments[0].created_at, first_ts);
    }

    #[test]
    fn comment_on_unknown_post_is_not_found() {
        let (store, alice) = store_with_user();
        let err = store
            .add_comment(Uuid::new_v4(), alice, "hi".to_string())
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Post")));
    }

    #[test]
    fn list_posts_keeps_insertion_order() {
        let (store, alice) = store_with_user();
        for text in ["one", "two", "three"] {
            store.create_post(alice, text.to_string()).unwrap();
        }

        let texts: Vec<String> = store.list_posts().into_iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn posts_by_author_filters_and_orders() {
        let (store, alice) = store_with_user();
        let bob = store
            .create_user("bob", bcrypt::hash("pw", 4).unwrap())
            .unwrap()
            .id;

        store.create_post(alice, "a1".to_string()).unwrap();
        store.create_post(bob, "b1".to_string()).unwrap();
        store.create_post(alice, "a2".to_string()).unwrap();

        let texts: Vec<String> = store
            .posts_by_author(alice)
            .into_iter()
            .map(|p| p.text)
            .collect();
        assert_eq!(texts, vec!["a1", "a2"]);
    }
}
