pub mod credentials;
pub mod feed;
pub mod graph;

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{Post, User};

pub use feed::LikeOutcome;

/// In-memory persistence backend.
///
/// All shared state lives behind `DashMap`s: per-entry locking makes the
/// like check-then-update atomic per post without cross-request locks.
#[derive(Debug)]
pub struct MemoryStore {
    pub(crate) users: DashMap<Uuid, User>,
    pub(crate) posts: DashMap<Uuid, Post>,
    /// Username -> user id, the uniqueness index consulted at sign-up.
    pub(crate) username_index: DashMap<String, Uuid>,
    pub(crate) user_seq: AtomicU64,
    pub(crate) post_seq: AtomicU64,
}

impl MemoryStore {
    /// Open the backend named by the connection string. Only the
    /// `memory://` scheme is implemented; anything else is refused so the
    /// process fails fast at startup.
    pub fn open(store_url: &str) -> Result<Self, ApiError> {
        if !store_url.starts_with("memory://") {
            return Err(ApiError::Store(format!(
                "unsupported store url scheme: {store_url}"
            )));
        }

        Ok(Self {
            users: DashMap::new(),
            posts: DashMap::new(),
            username_index: DashMap::new(),
            user_seq: AtomicU64::new(0),
            post_seq: AtomicU64::new(0),
        })
    }

    pub(crate) fn next_user_seq(&self) -> u64 {
        self.user_seq.fetch_add(1, Ordering::Relaxed)
    }

    pub(crate) fn next_post_seq(&self) -> u64 {
        self.post_seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// Run a write operation, retrying once if it fails transiently.
///
/// The in-memory backend never reports transient errors, but callers go
/// through this seam so a networked backend keeps the same contract.
pub fn retry_once<T, F>(mut op: F) -> Result<T, ApiError>
where
    F: FnMut() -> Result<T, ApiError>,
{
    match op() {
        Err(err) if err.is_transient() => op(),
        other => other,
    }
}
