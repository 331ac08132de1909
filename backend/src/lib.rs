//! Ambridge Backend Library
//!
//! Accounts, sessions and the project/crew content API. Exposed as a
//! library so integration tests can build the router directly.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
