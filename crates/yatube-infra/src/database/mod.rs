//! Database connection management and repository implementations.

mod connections;
pub mod entity;
pub mod memory;
pub mod postgres;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{
    InMemoryCommentRepository, InMemoryFollowRepository, InMemoryGroupRepository,
    InMemoryPostRepository, InMemoryUserRepository,
};
pub use postgres::{
    PostgresCommentRepository, PostgresFollowRepository, PostgresGroupRepository,
    PostgresPostRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
