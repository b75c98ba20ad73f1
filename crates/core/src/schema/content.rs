//! Project collections: creators, their works, and work categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Collection, Extra};
use crate::types::{CategoryId, CreatorId, FileId, ItemStatus, UserId, WorkId};

/// A creator profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: CreatorId,
    #[serde(default)]
    pub status: ItemStatus,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<FileId>,
    /// Directus account that owns this profile.
    #[serde(default)]
    pub user: Option<UserId>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Collection for Creator {
    const NAME: &'static str = "creators";
    const ENDPOINT: &'static str = "items/creators";
}

/// A piece of work published by a creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: WorkId,
    #[serde(default)]
    pub status: ItemStatus,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<CreatorId>,
    #[serde(default)]
    pub category: Option<CategoryId>,
    #[serde(default)]
    pub cover: Option<FileId>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Collection for Work {
    const NAME: &'static str = "works";
    const ENDPOINT: &'static str = "items/works";
}

/// A category works are filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Collection for Category {
    const NAME: &'static str = "categories";
    const ENDPOINT: &'static str = "items/categories";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_work_with_defaults() {
        let work: Work = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Harbour at dusk",
            "creator": 3,
            "date_created": "2024-05-01T10:00:00.000Z",
            "medium": "oil on canvas"
        }))
        .unwrap();

        assert_eq!(work.id, WorkId::new(7));
        assert_eq!(work.status, ItemStatus::Draft);
        assert_eq!(work.creator, Some(CreatorId::new(3)));
        assert!(work.category.is_none());
        assert!(work.date_created.is_some());
        assert_eq!(work.extra.len(), 1);
    }

    #[test]
    fn test_creator_status() {
        let creator: Creator = serde_json::from_value(serde_json::json!({
            "id": 1,
            "status": "published",
            "name": "Ada"
        }))
        .unwrap();

        assert!(creator.status.is_public());
        assert!(creator.user.is_none());
    }
}
