// Channel bookmark flow.

use crate::api::{ChannelApi, NewBookmark};
use crate::config::Config;
use crate::error::{Result, SetupError};
use crate::menu::bookmark::BookmarkAction;
use crate::prompt::Prompter;
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

/// What the bookmark flow ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkOutcome {
    /// Nothing configured, nothing touched.
    NothingConfigured,
    Created { replaced: bool },
    Aborted,
}

pub fn has_existing_bookmarks<A: ChannelApi + ?Sized>(
    api: &A,
    channel_id: &str,
) -> anyhow::Result<bool> {
    debug!("Checking for existing bookmarks");
    Ok(!api.list_bookmarks(channel_id)?.is_empty())
}

pub fn delete_existing_bookmarks<A: ChannelApi + ?Sized>(
    api: &A,
    channel_id: &str,
) -> anyhow::Result<()> {
    debug!("Deleting existing bookmarks");
    for bookmark in api.list_bookmarks(channel_id)? {
        api.delete_bookmark(channel_id, &bookmark.id).with_context(|| {
            format!(
                "Failed to delete bookmark with ID: {} (Name: {})",
                bookmark.id, bookmark.display_name
            )
        })?;
    }
    Ok(())
}

/// Create every configured bookmark, in config order.
pub fn create_bookmarks<A: ChannelApi + ?Sized>(
    api: &A,
    channel_id: &str,
    config: &Config,
) -> anyhow::Result<()> {
    debug!("Creating bookmarks");

    // draws nothing unless stderr is a terminal
    let progress = ProgressBar::new(config.bookmarks.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    for bookmark in &config.bookmarks {
        progress.set_message(bookmark.display_name.clone());
        let payload = NewBookmark::link(
            channel_id,
            &bookmark.display_name,
            &bookmark.link_url,
            &bookmark.emoji,
        );
        if let Err(e) = api.create_bookmark(&payload) {
            progress.abandon();
            return Err(e.context(format!("Failed to create bookmark {}", bookmark.display_name)));
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(())
}

/// Put the configured bookmarks in the channel, asking first when it already
/// has some.
pub fn process_channel_bookmarks<A, P>(
    api: &A,
    prompter: &mut P,
    channel_id: &str,
    config: &Config,
) -> Result<BookmarkOutcome>
where
    A: ChannelApi + ?Sized,
    P: Prompter + ?Sized,
{
    debug!("Processing channel bookmarks");

    if config.bookmarks.is_empty() {
        info!("No bookmarks found in JSON file");
        return Ok(BookmarkOutcome::NothingConfigured);
    }

    let has_bookmarks = has_existing_bookmarks(api, channel_id).map_err(SetupError::BookmarkCheck)?;

    let mut replaced = false;
    if has_bookmarks {
        match prompter.bookmark_action() {
            BookmarkAction::Replace => {
                info!("Replacing existing bookmarks");
                delete_existing_bookmarks(api, channel_id).map_err(SetupError::BookmarkDelete)?;
                replaced = true;
            }
            BookmarkAction::Append => info!("Appending bookmarks to existing"),
            BookmarkAction::Abort => {
                warn!("Aborting.  Please review existing bookmarks!");
                return Ok(BookmarkOutcome::Aborted);
            }
        }
    }

    create_bookmarks(api, channel_id, config).map_err(SetupError::BookmarkCreate)?;
    Ok(BookmarkOutcome::Created { replaced })
}
