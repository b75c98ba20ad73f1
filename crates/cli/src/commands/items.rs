//! Collection browsing.
//!
//! Reads as the logged-in user when a session exists, anonymously otherwise.

use clap::ValueEnum;
use creators_corner_client::{AuthError, Query};
use creators_corner_core::{Category, Creator, DirectusFile, UserProfile, Work};

use super::Session;

/// Collections the CLI can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollectionArg {
    Creators,
    Works,
    Categories,
    Files,
    Users,
}

/// List up to `limit` items of `collection`, one line each.
pub async fn list(session: &Session, collection: CollectionArg, limit: u32) -> Result<(), AuthError> {
    let query = Query::new().limit(limit);

    let lines: Vec<String> = match collection {
        CollectionArg::Creators => session
            .read_items::<Creator>(&query)
            .await?
            .iter()
            .map(|c| format!("#{} {} [{:?}]", c.id, c.name, c.status))
            .collect(),
        CollectionArg::Works => session
            .read_items::<Work>(&query.sort("-date_created"))
            .await?
            .iter()
            .map(|w| format!("#{} {} [{:?}]", w.id, w.title, w.status))
            .collect(),
        CollectionArg::Categories => session
            .read_items::<Category>(&query.sort("name"))
            .await?
            .iter()
            .map(|c| format!("#{} {}", c.id, c.name))
            .collect(),
        CollectionArg::Files => session
            .read_items::<DirectusFile>(&query)
            .await?
            .iter()
            .map(|f| {
                format!(
                    "{} {} ({})",
                    f.id,
                    f.filename_download.as_deref().unwrap_or("-"),
                    f.mime_type.as_deref().unwrap_or("unknown type")
                )
            })
            .collect(),
        CollectionArg::Users => session
            .read_items::<UserProfile>(&query.fields(UserProfile::PROFILE_FIELDS.iter().copied()))
            .await?
            .iter()
            .map(|u| format!("{} {}", u.id, u.display_name()))
            .collect(),
    };

    if lines.is_empty() {
        tracing::info!("No items");
    }
    for line in &lines {
        tracing::info!("{line}");
    }
    Ok(())
}
