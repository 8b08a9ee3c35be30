pub mod movie;
pub mod payloads;
pub mod user;
