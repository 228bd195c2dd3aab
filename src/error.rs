// Error types: every fatal failure site in the tool has its own variant so the
// top-level handler in `main.rs` can map it to a stable process exit code.
// Scripts wrapping this tool depend on these codes, so never renumber them.

use std::path::PathBuf;

/// A fatal error raised somewhere in the setup workflow.
///
/// The wrapped `anyhow::Error` carries the underlying cause (HTTP status,
/// transport error, parse error) with whatever context was attached on the
/// way up.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to build the Mattermost HTTP client")]
    Client(#[source] anyhow::Error),

    #[error("error processing JSON file {path:?}")]
    ConfigLoad {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("interactive pinned post menu failed")]
    PinnedPostMenu(#[source] anyhow::Error),

    /// The pinned post menu closed without recording any choice.
    #[error("interactive menu ended in an unexpected state")]
    PinnedPostUnexpected,

    #[error("failed to create pinned post")]
    PinnedPostCreate(#[source] anyhow::Error),

    #[error("failed to build link to pinned post")]
    PinnedPostLink(#[source] anyhow::Error),

    #[error("unable to validate if channel header exists")]
    HeaderCheck(#[source] anyhow::Error),

    #[error("error reading overwrite confirmation")]
    HeaderConfirm(#[source] anyhow::Error),

    #[error("error creating channel header")]
    HeaderCreate(#[source] anyhow::Error),

    #[error("failed to retrieve existing bookmarks")]
    BookmarkCheck(#[source] anyhow::Error),

    #[error("failed to create bookmarks")]
    BookmarkCreate(#[source] anyhow::Error),

    #[error("failed to delete existing bookmarks")]
    BookmarkDelete(#[source] anyhow::Error),
}

impl SetupError {
    /// Process exit code for this failure site.
    pub fn exit_code(&self) -> u8 {
        match self {
            SetupError::PinnedPostUnexpected => 3,
            SetupError::PinnedPostMenu(_) => 4,
            SetupError::PinnedPostCreate(_) => 6,
            SetupError::PinnedPostLink(_) => 7,
            SetupError::HeaderCheck(_) => 8,
            SetupError::HeaderConfirm(_) => 9,
            SetupError::ConfigLoad { .. } => 12,
            SetupError::HeaderCreate(_) => 31,
            SetupError::BookmarkCheck(_) => 41,
            SetupError::BookmarkCreate(_) => 42,
            SetupError::BookmarkDelete(_) => 45,
            SetupError::Client(_) => 50,
        }
    }
}

/// Convenience alias used by the workflow modules.
pub type Result<T> = std::result::Result<T, SetupError>;
