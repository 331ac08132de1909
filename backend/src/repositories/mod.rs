//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod crew;
#[cfg(test)]
pub mod memory;
pub mod project;
pub mod user;

pub use crew::{CrewRecord, CrewRepository};
pub use project::{ProjectRecord, ProjectRepository};
pub use user::{NewUser, ProfileChanges, UserDirectory, UserRecord, UserRepository};
