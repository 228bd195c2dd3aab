// Pinned post menu: pages through the channel's pinned posts and lets the user
// reuse one, create a new one, skip the step or abort the run.

use super::{Menu, MenuKey, MenuStep};

/// Longest preview shown for a pinned post.
pub const MAX_MESSAGE_LENGTH: usize = 40;
/// Posts shown per menu page.
pub const POSTS_PER_PAGE: usize = 2;

const ELLIPSIS: &str = "...";

/// Cut `input` down to `max_len` characters, ending in `...` when it was too
/// long. Counts characters, not bytes.
pub fn truncate_message(input: &str, max_len: usize) -> String {
    if input.chars().count() <= max_len {
        return input.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut out: String = input.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// A pinned post as shown in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post_id: String,
    pub message: String,
}

impl PostSummary {
    /// Summary from a full post body: first line only, truncated.
    pub fn from_post(post_id: &str, message: &str) -> Self {
        let first_line = message.split('\n').next().unwrap_or_default();
        PostSummary {
            post_id: post_id.to_string(),
            message: truncate_message(first_line, MAX_MESSAGE_LENGTH),
        }
    }
}

/// One line of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinnedOption {
    /// Index into the full post list.
    Post(usize),
    PreviousPage,
    NextPage,
    AddNew,
    Abort,
    Skip,
}

/// Recorded once the menu loop ends on a terminal option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinnedSelection {
    /// Index into the full post list.
    Post(usize),
    AddNew,
    Abort,
    Skip,
}

#[derive(Debug)]
pub struct PinnedPostMenu {
    posts: Vec<PostSummary>,
    per_page: usize,
    current_page: usize,
    cursor: usize,
    selected: Option<PinnedSelection>,
}

impl PinnedPostMenu {
    pub fn new(posts: Vec<PostSummary>, per_page: usize) -> Self {
        PinnedPostMenu {
            posts,
            per_page: per_page.max(1),
            current_page: 0,
            cursor: 0,
            selected: None,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Cursor clamped to the current option list.
    pub fn cursor(&self) -> usize {
        self.cursor.min(self.visible_options().len() - 1)
    }

    /// `None` until the user lands on a terminal option.
    pub fn selection(&self) -> Option<PinnedSelection> {
        self.selected
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    fn page_bounds(&self) -> (usize, usize) {
        let start = (self.current_page * self.per_page).min(self.posts.len());
        let end = (start + self.per_page).min(self.posts.len());
        (start, end)
    }

    fn has_next_page(&self) -> bool {
        (self.current_page + 1) * self.per_page < self.posts.len()
    }

    /// Posts on the current page, then the navigation entries that apply,
    /// then the fixed trailing options.
    pub fn visible_options(&self) -> Vec<PinnedOption> {
        let (start, end) = self.page_bounds();
        let mut options: Vec<PinnedOption> = (start..end).map(PinnedOption::Post).collect();

        if self.current_page > 0 {
            options.push(PinnedOption::PreviousPage);
        }
        if end < self.posts.len() {
            options.push(PinnedOption::NextPage);
        }
        options.extend([PinnedOption::AddNew, PinnedOption::Abort, PinnedOption::Skip]);
        options
    }

    pub fn label(&self, option: PinnedOption) -> &str {
        match option {
            PinnedOption::Post(index) => &self.posts[index].message,
            PinnedOption::PreviousPage => "Previous page",
            PinnedOption::NextPage => "Next page",
            PinnedOption::AddNew => "Add a new pinned post",
            PinnedOption::Abort => "Abort",
            PinnedOption::Skip => "Skip",
        }
    }

    fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page += 1;
            self.cursor = 0;
        }
    }

    fn previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
            self.cursor = 0;
        }
    }

    fn finish(&mut self, selection: PinnedSelection) -> MenuStep {
        self.selected = Some(selection);
        MenuStep::Done
    }
}

impl Menu for PinnedPostMenu {
    fn handle_key(&mut self, key: MenuKey) -> MenuStep {
        match key {
            MenuKey::Quit => return self.finish(PinnedSelection::Abort),
            MenuKey::Up => self.cursor = self.cursor().saturating_sub(1),
            MenuKey::Down => {
                let last = self.visible_options().len() - 1;
                self.cursor = (self.cursor() + 1).min(last);
            }
            MenuKey::Left => self.previous_page(),
            MenuKey::Right => self.next_page(),
            MenuKey::Enter => match self.visible_options()[self.cursor()] {
                PinnedOption::NextPage => self.next_page(),
                PinnedOption::PreviousPage => self.previous_page(),
                PinnedOption::Post(index) => return self.finish(PinnedSelection::Post(index)),
                PinnedOption::AddNew => return self.finish(PinnedSelection::AddNew),
                PinnedOption::Abort => return self.finish(PinnedSelection::Abort),
                PinnedOption::Skip => return self.finish(PinnedSelection::Skip),
            },
        }
        MenuStep::Continue
    }

    fn render(&self) -> String {
        if self.selected.is_some() {
            return String::new();
        }

        let cursor = self.cursor();
        let mut s = String::from("Use one of these existing pinned posts, or add a new one?\n\n");
        for (i, option) in self.visible_options().into_iter().enumerate() {
            let marker = if i == cursor { ">" } else { " " };
            s.push_str(&format!("{} {}\n", marker, self.label(option)));
        }
        s.push_str(
            "\nUse ↑/↓ to navigate, ←/→ to switch pages, and Enter to select. Press q to abort.\n",
        );
        s
    }
}
