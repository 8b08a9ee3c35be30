pub mod movie_store;
pub mod user_store;
