//! # Usuarios Core
//! 
//! Domain entity, input normalization, services, and the repository port.

pub mod domain;
pub mod normalize;
pub mod services;
pub mod repositories;
pub mod error;

pub use domain::*;
pub use error::DomainError;
