use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use yatube_core::domain::Comment;
use yatube_core::error::RepoError;
use yatube_core::ports::CommentRepository;

use super::map_db_err;
use crate::database::entity::comment::{self, Entity as CommentEntity};

/// PostgreSQL comment repository.
pub struct PostgresCommentRepository {
    db: Arc<DbConn>,
}

impl PostgresCommentRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, entity: Comment) -> Result<Comment, RepoError> {
        let active_model = comment::ActiveModel::from(entity);
        let model = active_model.insert(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_desc(comment::Column::Created)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
