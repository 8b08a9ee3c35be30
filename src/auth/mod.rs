pub mod service;
pub mod token;
