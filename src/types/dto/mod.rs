pub mod auth;
pub mod booking;
pub mod common;
pub mod user;
pub mod residence;
