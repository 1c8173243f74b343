pub mod auth;
pub mod feed;
pub mod health;
pub mod social;
pub mod uploads;
