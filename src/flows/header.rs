// Channel header flow.

use crate::api::ChannelApi;
use crate::config::Config;
use crate::error::{Result, SetupError};
use crate::prompt::{is_confirmation, Prompter};
use tracing::{debug, info, warn};

/// Header markdown: the team list followed by a one-column table of the
/// configured bookmarks.
pub fn channel_header_text(config: &Config) -> String {
    let mut header = String::from("Important Data (hover for expanded view)\n\n");
    for person in &config.team {
        header.push_str(&format!("{} - [{}]({})\n\n", person.role, person.name, person.email));
    }
    header.push_str("| Key Resources |\n");
    header.push_str("| -- |\n");
    for bookmark in &config.bookmarks {
        header.push_str(&format!("|[{}]({})|\n", bookmark.display_name, bookmark.link_url));
    }
    header
}

pub fn channel_header_exists<A: ChannelApi + ?Sized>(
    api: &A,
    channel_id: &str,
) -> anyhow::Result<bool> {
    debug!("Checking for existing channel header");
    let channel = api.get_channel(channel_id)?;
    Ok(!channel.header.is_empty())
}

/// Write the header, asking first when one is already set.
pub fn process_channel_header<A, P>(
    api: &A,
    prompter: &mut P,
    channel_id: &str,
    config: &Config,
) -> Result<()>
where
    A: ChannelApi + ?Sized,
    P: Prompter + ?Sized,
{
    debug!("Processing channel header");

    if config.bookmarks.is_empty() {
        warn!("No bookmarks found in JSON file");
        return Ok(());
    }
    debug!("Found {} bookmarks", config.bookmarks.len());

    let has_header = channel_header_exists(api, channel_id).map_err(SetupError::HeaderCheck)?;
    let overwrite = if has_header {
        let answer = prompter.overwrite_header_answer().map_err(SetupError::HeaderConfirm)?;
        is_confirmation(&answer)
    } else {
        true
    };

    if !overwrite {
        info!("Using existing Channel Header");
        return Ok(());
    }

    info!("Replacing existing Channel Header");
    debug!("Creating channel header");
    api.patch_channel_header(channel_id, &channel_header_text(config))
        .map_err(SetupError::HeaderCreate)
}
