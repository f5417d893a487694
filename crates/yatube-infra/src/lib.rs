//! # Yatube Infrastructure
//!
//! Concrete implementations of the ports defined in `yatube-core`:
//! PostgreSQL repositories via SeaORM, in-memory repositories for
//! database-less operation and tests, and the Argon2/JWT session stack.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections};
