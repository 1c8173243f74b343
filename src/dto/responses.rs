use serde::Serialize;
use uuid::Uuid;

use crate::models::{Post, User};
use crate::store::MemoryStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub profile_pic: Option<String>,
    pub followers_count: usize,
    pub following_count: usize,
    pub created_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            profile_pic: user.profile_pic,
            followers_count: user.followers.len(),
            following_count: user.following.len(),
            created_at: user.created_at,
        }
    }
}

/// A post author or comment author, resolved to a displayable identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: Uuid,
    pub username: String,
    pub profile_pic: Option<String>,
}

impl AuthorView {
    fn resolve(user_id: Uuid, store: &MemoryStore) -> Self {
        match store.user(user_id) {
            Some(user) => Self {
                id: user.id,
                username: user.username,
                profile_pic: user.profile_pic,
            },
            // Users are never deleted, so this only covers records written
            // without an integrity check.
            None => Self {
                id: user_id,
                username: "unknown".to_string(),
                profile_pic: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub user: AuthorView,
    pub text: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub text: String,
    pub sender: AuthorView,
    pub likes: u64,
    pub liked_by: Vec<Uuid>,
    pub comments: Vec<CommentView>,
    pub created_at: i64,
}

impl PostView {
    pub fn resolve(post: &Post, store: &MemoryStore) -> Self {
        let mut liked_by: Vec<Uuid> = post.liked_by.iter().copied().collect();
        liked_by.sort();

        Self {
            id: post.id,
            text: post.text.clone(),
            sender: AuthorView::resolve(post.sender, store),
            likes: post.likes,
            liked_by,
            comments: post
                .comments
                .iter()
                .map(|c| CommentView {
                    user: AuthorView::resolve(c.user, store),
                    text: c.text.clone(),
                    created_at: c.created_at,
                })
                .collect(),
            created_at: post.created_at,
        }
    }
}

/// Who is looking at the feed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerView {
    pub id: Option<Uuid>,
    pub username: String,
    pub is_guest: bool,
}

impl ViewerView {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: Some(user.id),
            username: user.username.clone(),
            is_guest: false,
        }
    }

    pub fn guest() -> Self {
        Self {
            id: None,
            username: "Guest".to_string(),
            is_guest: true,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub viewer: Option<ViewerView>,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub followers: Vec<UserResponse>,
    pub following: Vec<UserResponse>,
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub already_liked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostView>,
}
