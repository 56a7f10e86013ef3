//! Tag helpers shared by the tagging commands
//!
//! A tagging run first makes sure the tag exists and carries no stale
//! assignments, then assigns it page by page as the collector finds assets.

use async_trait::async_trait;
use indicatif::ProgressBar;
use log::info;

use crate::cli::progress::{page_spinner, say};
use crate::client::models::{Asset, Tag};
use crate::client::tenable::TAG_DESCRIPTION;
use crate::client::{AssetSearch, BatchSink, PaginatedCollector, TagApi, TenableApi};
use crate::error::{Error, Result};

/// Explore filter matching the assets carrying `tag`.
pub fn tagged_with(tag: &Tag) -> serde_json::Value {
    serde_json::json!({
        "and": [{
            "property": "tags",
            "operator": "eq",
            "value": [tag.uuid]
        }]
    })
}

fn ids_and_names(batch: &[Asset]) -> (Vec<String>, String) {
    let ids = batch.iter().map(|a| a.id.clone()).collect();
    let names = batch
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join("|");
    (ids, names)
}

/// Side effect assigning one tag to every batch of assets.
pub struct TagAssigner<'a, C: ?Sized> {
    client: &'a C,
    tag: &'a Tag,
    progress: ProgressBar,
    assigned: usize,
}

impl<'a, C: TagApi + ?Sized> TagAssigner<'a, C> {
    pub fn new(client: &'a C, tag: &'a Tag) -> Self {
        Self::with_progress(client, tag, page_spinner(format!("Tagging {}", tag.label())))
    }

    pub fn with_progress(client: &'a C, tag: &'a Tag, progress: ProgressBar) -> Self {
        Self {
            client,
            tag,
            progress,
            assigned: 0,
        }
    }

    /// Assets tagged so far.
    pub fn assigned(&self) -> usize {
        self.assigned
    }

    pub fn finish(&self) {
        self.progress.finish_and_clear();
    }
}

#[async_trait]
impl<'a, C: TagApi + ?Sized> BatchSink<Asset> for TagAssigner<'a, C> {
    async fn on_new_batch(&mut self, batch: &[Asset]) -> Result<()> {
        let (ids, names) = ids_and_names(batch);
        self.client
            .assign_tags(&ids, std::slice::from_ref(&self.tag.uuid))
            .await?;

        self.assigned += batch.len();
        self.progress
            .set_message(format!("Tagging {} ({} assets)", self.tag.label(), self.assigned));
        say(
            &self.progress,
            format!("(*) Tag \"{}\" has been assigned to {}", self.tag.label(), names),
        );
        Ok(())
    }
}

/// Side effect removing one tag from every batch of assets.
struct TagRemover<'a, C: ?Sized> {
    client: &'a C,
    tag: &'a Tag,
}

#[async_trait]
impl<'a, C: TagApi + ?Sized> BatchSink<Asset> for TagRemover<'a, C> {
    async fn on_new_batch(&mut self, batch: &[Asset]) -> Result<()> {
        let (ids, names) = ids_and_names(batch);
        self.client
            .unassign_tags(&ids, std::slice::from_ref(&self.tag.uuid))
            .await?;
        println!(
            "(*) Tag \"{}\" has been removed from {}",
            self.tag.label(),
            names
        );
        Ok(())
    }
}

/// Make sure the tag `category:value` exists with no assignments.
///
/// An existing tag is detached from every asset currently carrying it; a
/// missing one is created.
pub async fn ensure_tag<C: TenableApi + ?Sized>(
    client: &C,
    collector: &PaginatedCollector,
    category: &str,
    value: &str,
) -> Result<Tag> {
    let Some(tag) = client.find_tag(category, value).await? else {
        let tag = client.create_tag(category, value, TAG_DESCRIPTION).await?;
        println!(
            "(*) Tag \"{}\" with ID \"{}\" has been created",
            tag.label(),
            tag.uuid
        );
        return Ok(tag);
    };

    info!("Tag {} exists ({}), clearing assignments", tag.label(), tag.uuid);
    let mut remover = TagRemover {
        client,
        tag: &tag,
    };
    let cleared = collector
        .collect(
            &AssetSearch::new(client),
            &tagged_with(&tag),
            |a: &Asset| a.id.clone(),
            &mut remover,
        )
        .await?;

    if cleared.is_cancelled() {
        return Err(Error::Other(format!(
            "Interrupted while clearing assignments of {}",
            tag.label()
        )));
    }

    println!(
        "(*) Tag \"{}\" with ID \"{}\" is ready ({} previous assignments removed)",
        tag.label(),
        tag.uuid,
        cleared.items.len()
    );
    Ok(tag)
}
