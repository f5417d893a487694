use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use yatube_core::domain::Follow;
use yatube_core::error::RepoError;
use yatube_core::ports::FollowRepository;

use super::map_db_err;
use crate::database::entity::follow::{self, Entity as FollowEntity};

/// PostgreSQL follow repository.
///
/// Follow creation rides the unique `(user_id, author_id)` index:
/// `ON CONFLICT DO NOTHING` makes concurrent follows race-free without
/// a read-then-write round trip.
pub struct PostgresFollowRepository {
    db: Arc<DbConn>,
}

impl PostgresFollowRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        let active_model = follow::ActiveModel::from(Follow::new(user_id, author_id));

        FollowEntity::insert(active_model)
            .on_conflict(
                OnConflict::columns([follow::Column::UserId, follow::Column::AuthorId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<(), RepoError> {
        FollowEntity::delete_many()
            .filter(follow::Column::UserId.eq(user_id))
            .filter(follow::Column::AuthorId.eq(author_id))
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(())
    }

    async fn is_following(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, RepoError> {
        let count = FollowEntity::find()
            .filter(follow::Column::UserId.eq(user_id))
            .filter(follow::Column::AuthorId.eq(author_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }
}
