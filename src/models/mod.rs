pub mod post;
pub mod user;

pub use post::{Comment, Post};
pub use user::User;
