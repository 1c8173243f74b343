use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Reference to the stored picture (`/uploads/<file>`), not the binary.
    pub profile_pic: Option<String>,
    pub followers: HashSet<Uuid>,
    pub following: HashSet<Uuid>,
    pub created_at: i64,
    /// Monotone insertion counter, used for stable user listings.
    pub seq: u64,
}
