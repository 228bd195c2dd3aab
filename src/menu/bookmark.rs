// Bookmark conflict menu: shown when the channel already has bookmarks.

use super::{Menu, MenuKey, MenuStep};
use std::fmt;

/// What to do with the bookmarks already present in the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkAction {
    /// Delete the existing bookmarks, then create the configured ones.
    Replace,
    /// Create the configured bookmarks next to the existing ones.
    Append,
    /// Leave the channel untouched.
    Abort,
}

impl fmt::Display for BookmarkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookmarkAction::Replace => "Replace",
            BookmarkAction::Append => "Append",
            BookmarkAction::Abort => "Abort",
        };
        f.write_str(label)
    }
}

const OPTIONS: [BookmarkAction; 3] = [
    BookmarkAction::Replace,
    BookmarkAction::Append,
    BookmarkAction::Abort,
];

#[derive(Debug)]
pub struct BookmarkMenu {
    cursor: usize,
    selected: BookmarkAction,
    done: bool,
}

impl Default for BookmarkMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkMenu {
    pub fn new() -> Self {
        BookmarkMenu {
            cursor: 0,
            // Abort unless the user explicitly picks something else
            selected: BookmarkAction::Abort,
            done: false,
        }
    }

    pub fn selected_action(&self) -> BookmarkAction {
        self.selected
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Menu for BookmarkMenu {
    fn handle_key(&mut self, key: MenuKey) -> MenuStep {
        match key {
            MenuKey::Quit => {
                self.done = true;
                self.selected = BookmarkAction::Abort;
                return MenuStep::Done;
            }
            MenuKey::Up => self.cursor = self.cursor.saturating_sub(1),
            MenuKey::Down => {
                if self.cursor < OPTIONS.len() - 1 {
                    self.cursor += 1;
                }
            }
            MenuKey::Enter => {
                self.done = true;
                self.selected = OPTIONS[self.cursor];
                return MenuStep::Done;
            }
            MenuKey::Left | MenuKey::Right => {}
        }
        MenuStep::Continue
    }

    fn render(&self) -> String {
        if self.done {
            return String::new();
        }

        let mut s = String::from("Existing Bookmarks Found\n\n");
        for (i, option) in OPTIONS.iter().enumerate() {
            let cursor = if i == self.cursor { ">" } else { " " };
            s.push_str(&format!("{} {}\n", cursor, option));
        }
        s.push_str("\nUse ↑/↓ to navigate and Enter to select. Press q to abort.");
        s
    }
}
