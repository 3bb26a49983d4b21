pub mod api;
pub mod author;
pub mod health;
pub mod home;
pub mod posts;
