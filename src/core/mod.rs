//! Core module - Infrastructure components of the application
//!
//! - Authentication and authorization guards
//! - Configuration
//! - Error handling
//! - Application state

pub mod auth;
pub mod config;
pub mod error;
pub mod state;

// Re-exports to ease imports
pub use auth::{
    Claims, authentication_middleware, decode_jwt, require_admin, require_not_self,
    require_receiver,
};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
