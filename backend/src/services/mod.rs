//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod auth;
pub mod crew;
pub mod project;

pub use auth::AuthService;
pub use crew::CrewService;
pub use project::ProjectService;
