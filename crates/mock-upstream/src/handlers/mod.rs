pub mod api;
pub mod delayed;
pub mod health;
pub mod session;
