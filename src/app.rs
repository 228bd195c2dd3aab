// Orchestrator: loads the config, resolves the pinned post, then updates the
// header and the bookmarks. The first failure stops the run.

use crate::api::ChannelApi;
use crate::config::Config;
use crate::error::{Result, SetupError};
use crate::flows::bookmarks::process_channel_bookmarks;
use crate::flows::header::process_channel_header;
use crate::flows::pinned::{process_pinned_posts, PinnedPostLink};
use crate::prompt::Prompter;
use std::path::Path;
use tracing::{debug, info};

/// How a run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user aborted from the pinned post menu. Nothing after it ran.
    Aborted,
}

/// Options for a single run against one channel.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions<'a> {
    pub channel_id: &'a str,
    pub no_header: bool,
}

pub fn load_config(path: &Path) -> Result<Config> {
    debug!("Processing JSON");
    let config = Config::load(path).map_err(|source| SetupError::ConfigLoad {
        path: path.to_path_buf(),
        source,
    })?;
    config.log_summary();
    debug!("JSON processed");
    Ok(config)
}

/// Run every flow against an already loaded config.
pub fn apply<A, P>(
    api: &A,
    prompter: &mut P,
    options: RunOptions<'_>,
    mut config: Config,
) -> Result<Outcome>
where
    A: ChannelApi + ?Sized,
    P: Prompter + ?Sized,
{
    let link = process_pinned_posts(api, prompter, options.channel_id, &config)?;
    if link == PinnedPostLink::Aborted {
        return Ok(Outcome::Aborted);
    }
    debug!("Link to pinned post: {}", link.as_str());
    config.append_pinned_post_bookmark(link.as_str());

    if !options.no_header {
        process_channel_header(api, prompter, options.channel_id, &config)?;
    }

    process_channel_bookmarks(api, prompter, options.channel_id, &config)?;
    Ok(Outcome::Completed)
}

/// Load the config at `config_path` and apply it.
pub fn run<A, P>(
    api: &A,
    prompter: &mut P,
    options: RunOptions<'_>,
    config_path: &Path,
) -> Result<Outcome>
where
    A: ChannelApi + ?Sized,
    P: Prompter + ?Sized,
{
    info!("Processing started - Version: {}", env!("CARGO_PKG_VERSION"));
    let config = load_config(config_path)?;
    apply(api, prompter, options, config)
}
