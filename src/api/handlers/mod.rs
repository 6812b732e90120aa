pub mod auth;
pub mod health;
pub mod images;
pub mod products;
pub mod users;
