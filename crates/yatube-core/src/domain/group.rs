use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Group entity - a named category posts may optionally belong to.
///
/// The slug uniquely addresses the group in routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
}

impl Group {
    pub fn new(title: String, slug: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            description,
        }
    }
}
