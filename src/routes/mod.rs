pub mod debug;
pub mod health;
pub mod home;
pub mod teams;
pub mod user;
