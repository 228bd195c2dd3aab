// Config module: the JSON document describing what should end up in the
// channel. Sections that are missing from the file deserialize as empty lists.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Display name of the bookmark synthesized from the pinned post link.
pub const PINNED_POST_BOOKMARK_NAME: &str = "Additional Resources";
const PINNED_POST_BOOKMARK_EMOJI: &str = ":bulb:";

/// One row of the team table in the channel header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub role: String,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub display_name: String,
    pub link_url: String,
    pub emoji: String,
}

/// One row of the "Additional Resources" pinned post.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub display_name: String,
    pub url: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub team: Vec<Person>,
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Config {
    /// Read and decode the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).context("failed to open file")?;
        let config: Config =
            serde_json::from_reader(BufReader::new(file)).context("failed to decode JSON")?;
        Ok(config)
    }

    /// Add the bookmark pointing at the pinned post. Nothing is added when
    /// there is no link or no configured bookmarks.
    pub fn append_pinned_post_bookmark(&mut self, link: &str) {
        if link.is_empty() || self.bookmarks.is_empty() {
            return;
        }
        self.bookmarks.push(Bookmark {
            display_name: PINNED_POST_BOOKMARK_NAME.to_string(),
            link_url: link.to_string(),
            emoji: PINNED_POST_BOOKMARK_EMOJI.to_string(),
        });
    }

    /// Log what was found in each section. Individual entries only show up
    /// at debug level.
    pub fn log_summary(&self) {
        if self.team.is_empty() {
            info!("No team information provided in JSON file.");
        } else {
            debug!("Team Members:");
            for person in &self.team {
                debug!("  - {} ({}): {}", person.role, person.name, person.email);
            }
        }

        if self.bookmarks.is_empty() {
            info!("No bookmarks provided in JSON file.");
        } else {
            debug!("Bookmarks:");
            for bookmark in &self.bookmarks {
                debug!("  - [{}]({}) {}", bookmark.display_name, bookmark.link_url, bookmark.emoji);
            }
        }

        if self.resources.is_empty() {
            info!("No resources provided in JSON file.");
        } else {
            debug!("Resources:");
            for resource in &self.resources {
                debug!(
                    "  - {}: {} ({})",
                    resource.display_name, resource.description, resource.url
                );
            }
        }
    }
}
