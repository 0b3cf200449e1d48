//! # Usuarios Shared
//! 
//! Configuration, telemetry, and common types for the usuarios service.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
