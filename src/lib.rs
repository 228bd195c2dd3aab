// Library root
// -----------
// Sets up a Mattermost channel (header, bookmarks, pinned post) from a JSON
// file. The binary (`main.rs`) parses the command line and hands control to
// `app::run`.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the Mattermost REST API, behind the
//   `ChannelApi` trait.
// - `config`: the JSON config file.
// - `menu`: render-on-input terminal menus (bookmark conflicts, pinned post
//   pagination).
// - `prompt`: the `Prompter` seam between the workflow and the terminal.
// - `flows`: the pinned post, header and bookmark workflows.
// - `app`: runs the flows in order.
// - `cli`, `logging`, `error`: command line, tracing setup and exit codes.
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod flows;
pub mod logging;
pub mod menu;
pub mod prompt;
