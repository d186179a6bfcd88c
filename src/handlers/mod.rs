pub mod health;
pub mod session;
pub mod team;
pub mod teams;
