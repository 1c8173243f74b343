use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub sender: Uuid,
    pub likes: u64,
    /// Deduplication set: a user id appears here at most once, so `likes`
    /// always equals `liked_by.len()`.
    pub liked_by: HashSet<Uuid>,
    pub comments: Vec<Comment>,
    pub created_at: i64,
    /// Monotone insertion counter; feed listing order is insertion order.
    pub seq: u64,
}

/// Embedded in a [`Post`]; append-only and immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub user: Uuid,
    pub text: String,
    pub created_at: i64,
}
