// Pinned post flow: reuse an existing pinned post or create one from the
// resources table, then build a permalink to it.

use crate::api::{ChannelApi, NewPost};
use crate::config::Config;
use crate::error::{Result, SetupError};
use crate::menu::pinned::{PinnedSelection, PostSummary};
use crate::prompt::Prompter;
use tracing::{debug, info, warn};

/// How the pinned post step was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinnedPostChoice {
    Existing { post_id: String, message: String },
    AddNew,
    Skip,
    Abort,
}

/// Result of the whole pinned post step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinnedPostLink {
    /// Permalink to the pinned post that should be bookmarked.
    Link(String),
    /// The user skipped the step; no link.
    Skipped,
    /// The user asked to stop the whole run.
    Aborted,
}

impl PinnedPostLink {
    /// The permalink, or an empty string when there is none.
    pub fn as_str(&self) -> &str {
        match self {
            PinnedPostLink::Link(link) => link,
            PinnedPostLink::Skipped | PinnedPostLink::Aborted => "",
        }
    }
}

/// Message body of the "Additional Resources" post.
pub fn pinned_post_message(config: &Config) -> String {
    let mut message = String::from("## Additional Resources\n\n\n");
    message.push_str(&format!("| {:<111} | {:<111} |\n", "Resource", "Description"));
    message.push_str(&format!("| {} | {} |\n", "-".repeat(111), "-".repeat(111)));
    for row in &config.resources {
        message.push_str(&format!(
            "| [{}]({}) | {} |\n",
            row.display_name, row.url, row.description
        ));
    }
    message
}

/// List the channel's pinned posts and ask which one to use.
pub fn choose_pinned_post<A, P>(
    api: &A,
    prompter: &mut P,
    channel_id: &str,
) -> Result<PinnedPostChoice>
where
    A: ChannelApi + ?Sized,
    P: Prompter + ?Sized,
{
    debug!("Retrieving pinned posts");
    let pinned = api.list_pinned_posts(channel_id).map_err(SetupError::PinnedPostMenu)?;

    let summaries: Vec<PostSummary> = pinned
        .ordered()
        .map(|post| PostSummary::from_post(&post.id, &post.message))
        .collect();
    if summaries.is_empty() {
        debug!("No pinned posts found");
        return Ok(PinnedPostChoice::AddNew);
    }

    let selection = prompter.pinned_post(&summaries).map_err(SetupError::PinnedPostMenu)?;
    match selection {
        Some(PinnedSelection::Post(index)) => {
            let summary = summaries.get(index).ok_or(SetupError::PinnedPostUnexpected)?;
            Ok(PinnedPostChoice::Existing {
                post_id: summary.post_id.clone(),
                message: summary.message.clone(),
            })
        }
        Some(PinnedSelection::AddNew) => Ok(PinnedPostChoice::AddNew),
        Some(PinnedSelection::Skip) => Ok(PinnedPostChoice::Skip),
        Some(PinnedSelection::Abort) => Ok(PinnedPostChoice::Abort),
        None => Err(SetupError::PinnedPostUnexpected),
    }
}

/// Post the resources table as a new pinned post and return its id.
pub fn create_pinned_post<A: ChannelApi + ?Sized>(
    api: &A,
    channel_id: &str,
    config: &Config,
) -> anyhow::Result<String> {
    debug!("Creating pinned post from JSON data");
    let post = api.create_post(&NewPost {
        channel_id: channel_id.to_string(),
        message: pinned_post_message(config),
        is_pinned: true,
    })?;
    Ok(post.id)
}

/// Permalink of the form `<server>/<team name>/pl/<post id>`. The team name
/// comes from the channel's team.
pub fn build_link_to_pinned_post<A: ChannelApi + ?Sized>(
    api: &A,
    channel_id: &str,
    post_id: &str,
) -> anyhow::Result<String> {
    debug!("Building link to pinned post");
    let channel = api.get_channel(channel_id)?;
    debug!("Found Team ID: {}", channel.team_id);
    let team = api.get_team(&channel.team_id)?;
    Ok(format!("{}/{}/pl/{}", api.base_url(), team.name, post_id))
}

/// Resolve the pinned post and return the link to bookmark.
pub fn process_pinned_posts<A, P>(
    api: &A,
    prompter: &mut P,
    channel_id: &str,
    config: &Config,
) -> Result<PinnedPostLink>
where
    A: ChannelApi + ?Sized,
    P: Prompter + ?Sized,
{
    let post_id = match choose_pinned_post(api, prompter, channel_id)? {
        PinnedPostChoice::Existing { post_id, message } => {
            debug!("Existing Pinned Post selected.  Post ID: {} ({})", post_id, message);
            post_id
        }
        PinnedPostChoice::AddNew => {
            info!("Adding new post from JSON");
            create_pinned_post(api, channel_id, config).map_err(SetupError::PinnedPostCreate)?
        }
        PinnedPostChoice::Skip => {
            info!("Skipping pinned post");
            return Ok(PinnedPostLink::Skipped);
        }
        PinnedPostChoice::Abort => {
            warn!("Aborting due to user selection");
            return Ok(PinnedPostLink::Aborted);
        }
    };

    debug!("Pinned Post ID: {}", post_id);
    let link =
        build_link_to_pinned_post(api, channel_id, &post_id).map_err(SetupError::PinnedPostLink)?;
    Ok(PinnedPostLink::Link(link))
}
