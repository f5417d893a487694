//! PostgreSQL repository implementations.

mod comments;
mod follows;
mod groups;
mod posts;
mod users;

pub use comments::PostgresCommentRepository;
pub use follows::PostgresFollowRepository;
pub use groups::PostgresGroupRepository;
pub use posts::PostgresPostRepository;
pub use users::PostgresUserRepository;

use sea_orm::DbErr;

use yatube_core::error::RepoError;

/// Map database errors onto the repository error taxonomy.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    let err_str = err.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint(err_str)
    } else {
        RepoError::Query(err_str)
    }
}
