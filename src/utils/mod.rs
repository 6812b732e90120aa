pub mod auth;
pub mod hash;
