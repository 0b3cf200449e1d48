//! # Usuarios Security
//! 
//! Password hashing and verification.

pub mod password;

pub use password::{PasswordError, PasswordService};
