// The three per-artifact workflows. Each one checks the channel's current
// state, asks the user when something is already there, and then writes.

pub mod bookmarks;
pub mod header;
pub mod pinned;
