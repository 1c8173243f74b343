pub mod requests;
pub mod responses;

pub use requests::{AddCommentRequest, LoginRequest, SendPostRequest, SignupRequest};
pub use responses::{
    AuthorView, CommentView, FeedResponse, LikeResponse, PostView, ProfileResponse, UserResponse,
    ViewerView,
};
