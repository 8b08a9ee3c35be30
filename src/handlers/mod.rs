pub mod fallback;
pub mod favourites;
pub mod health;
pub mod users;
