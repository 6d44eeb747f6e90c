//! Parties: the people operating the dashboard.

pub mod user;

pub use user::{NewUser, User};
