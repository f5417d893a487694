use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Follow edge - `user` receives `author`'s posts in their follow feed.
///
/// The `(user_id, author_id)` pair is unique at the storage layer;
/// creation goes through insert-if-absent so concurrent follows cannot
/// produce duplicate edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_id: Uuid,
}

impl Follow {
    pub fn new(user_id: Uuid, author_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            author_id,
        }
    }
}
