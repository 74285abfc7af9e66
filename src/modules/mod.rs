pub mod auth;
pub mod catalog;
pub mod contacts;
pub mod requests;
pub mod reviews;
