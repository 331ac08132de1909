//! Ambridge Shared Library
//!
//! Wire types, domain models, and validation helpers used by the backend
//! and its tests.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::Role;
pub use types::*;
