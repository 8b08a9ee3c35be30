pub mod core;
pub mod models;
pub mod stores;
pub mod auth;
pub mod security;
pub mod handlers;
pub mod utils;
