use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use yatube_core::domain::Post;
use yatube_core::error::RepoError;
use yatube_core::feed::{FeedScope, Page, PageRequest};
use yatube_core::ports::PostRepository;

use super::map_db_err;
use crate::database::entity::follow;
use crate::database::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository. All four feed scopes resolve to one
/// filtered query ordered by publish timestamp descending.
pub struct PostgresPostRepository {
    db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    fn scoped(scope: &FeedScope) -> Select<PostEntity> {
        let query = PostEntity::find();
        match scope {
            FeedScope::Global { keyword } => match keyword {
                // LIKE '%kw%' - case-sensitive substring match
                Some(keyword) => query.filter(post::Column::Text.contains(keyword)),
                None => query,
            },
            FeedScope::Group { group_id } => query.filter(post::Column::GroupId.eq(*group_id)),
            FeedScope::Profile { author_id } => query.filter(post::Column::AuthorId.eq(*author_id)),
            FeedScope::Following { viewer_id } => query.filter(
                post::Column::AuthorId.in_subquery(
                    Query::select()
                        .column(follow::Column::AuthorId)
                        .from(follow::Entity)
                        .and_where(follow::Column::UserId.eq(*viewer_id))
                        .to_owned(),
                ),
            ),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        let active_model = post::ActiveModel::from(entity);
        let model = active_model.insert(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let active_model = post::ActiveModel::from(entity);
        let model = active_model.update(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn feed_page(
        &self,
        scope: &FeedScope,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let total = Self::scoped(scope)
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        let resolved = page.resolve(total);

        let models = Self::scoped(scope)
            .order_by_desc(post::Column::PubDate)
            .offset(resolved.offset)
            .limit(resolved.limit)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            resolved,
        ))
    }
}
