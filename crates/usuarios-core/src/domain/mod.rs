//! # Usuarios Core - Domain Module

pub mod user;

pub use user::{photo_url, NewUser, User, UserChanges, UserProfile, UserStatus};
