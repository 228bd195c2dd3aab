// Prompt layer: everything the workflow asks the user goes through the
// `Prompter` trait. `TerminalPrompter` is the interactive implementation used
// by the binary.

use crate::menu::bookmark::{BookmarkAction, BookmarkMenu};
use crate::menu::pinned::{PinnedPostMenu, PinnedSelection, PostSummary, POSTS_PER_PAGE};
use crate::menu::run_interactive;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::error;

pub const OVERWRITE_HEADER_PROMPT: &str =
    "A channel header already exists.  Overwrite? (Press Y to confirm, or any other key to abort)";

pub trait Prompter {
    /// Ask what to do with existing bookmarks. Never fails: anything going
    /// wrong with the menu counts as Abort.
    fn bookmark_action(&mut self) -> BookmarkAction;

    /// Let the user pick among existing pinned posts. `Ok(None)` means the
    /// menu closed without recording a choice.
    fn pinned_post(&mut self, posts: &[PostSummary]) -> Result<Option<PinnedSelection>>;

    /// Raw answer to the header overwrite question.
    fn overwrite_header_answer(&mut self) -> Result<String>;
}

/// `y` in any case, surrounding whitespace ignored.
pub fn is_confirmation(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn bookmark_action(&mut self) -> BookmarkAction {
        let mut menu = BookmarkMenu::new();
        if let Err(e) = run_interactive(&mut menu) {
            error!("Error running bookmark menu: {:#}", e);
            return BookmarkAction::Abort;
        }
        menu.selected_action()
    }

    fn pinned_post(&mut self, posts: &[PostSummary]) -> Result<Option<PinnedSelection>> {
        let mut menu = PinnedPostMenu::new(posts.to_vec(), POSTS_PER_PAGE);
        run_interactive(&mut menu).context("Error displaying menu")?;
        Ok(menu.selection())
    }

    fn overwrite_header_answer(&mut self) -> Result<String> {
        read_answer(OVERWRITE_HEADER_PROMPT, &mut io::stdin().lock(), &mut io::stdout())
    }
}

/// Print `prompt` and read one line from `input`. Input that ends before
/// anything was read is an error, as is a failed read.
pub fn read_answer<R, W>(prompt: &str, input: &mut R, out: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", prompt).context("Error writing prompt")?;
    out.flush().context("Error writing prompt")?;

    let mut answer = String::new();
    let read = input.read_line(&mut answer).context("Error reading input")?;
    if read == 0 {
        anyhow::bail!("Error reading input: end of input");
    }
    Ok(answer)
}
