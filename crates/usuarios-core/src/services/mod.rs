//! Domain services (business logic)

pub mod auth_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use user_service::{ServiceOptions, UpdateMode, UserInput, UserService};
