// In-memory stand-ins for the Mattermost server and the terminal.

#![allow(dead_code)]

use anyhow::Result;
use mm_channel_setup::api::{
    Channel, ChannelApi, ChannelBookmark, NewBookmark, NewPost, Post, PostList, Team,
};
use mm_channel_setup::config::{Bookmark, Config, Person, Resource};
use mm_channel_setup::menu::bookmark::BookmarkAction;
use mm_channel_setup::menu::pinned::{PinnedPostMenu, PinnedSelection, PostSummary, POSTS_PER_PAGE};
use mm_channel_setup::menu::{run_menu, MenuKey, ScriptedKeys};
use mm_channel_setup::prompt::Prompter;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

pub const BASE_URL: &str = "https://mm.example.com:443";
pub const CHANNEL: &str = "chan1";

/// Fake server state plus a log of every call made against it.
pub struct FakeApi {
    pub header: RefCell<String>,
    pub bookmarks: RefCell<Vec<ChannelBookmark>>,
    pub pinned: Vec<Post>,
    pub calls: RefCell<Vec<String>>,
    pub created_bookmarks: RefCell<Vec<NewBookmark>>,
    pub created_posts: RefCell<Vec<NewPost>>,
    /// Name of the call that should fail, e.g. "delete_bookmark".
    pub fail_on: Option<&'static str>,
}

impl Default for FakeApi {
    fn default() -> Self {
        FakeApi {
            header: RefCell::new(String::new()),
            bookmarks: RefCell::new(Vec::new()),
            pinned: Vec::new(),
            calls: RefCell::new(Vec::new()),
            created_bookmarks: RefCell::new(Vec::new()),
            created_posts: RefCell::new(Vec::new()),
            fail_on: None,
        }
    }
}

impl FakeApi {
    pub fn with_bookmarks(ids: &[&str]) -> Self {
        let api = FakeApi::default();
        *api.bookmarks.borrow_mut() = ids
            .iter()
            .map(|id| ChannelBookmark {
                id: id.to_string(),
                display_name: format!("Old {}", id),
                link_url: format!("https://old.example.com/{}", id),
            })
            .collect();
        api
    }

    pub fn with_pinned_posts(count: usize) -> Self {
        FakeApi {
            pinned: (1..=count)
                .map(|i| Post {
                    id: format!("post{}", i),
                    channel_id: CHANNEL.to_string(),
                    message: format!("Pinned number {}\nsecond line", i),
                })
                .collect(),
            ..FakeApi::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(name))
    }

    fn record(&self, call: String) -> Result<()> {
        let name = call.split(' ').next().unwrap_or_default().to_string();
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(name.as_str()) {
            anyhow::bail!("{} returned bad HTTP response: 500 Internal Server Error", name);
        }
        Ok(())
    }
}

impl ChannelApi for FakeApi {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        self.record(format!("get_channel {}", channel_id))?;
        Ok(Channel {
            id: channel_id.to_string(),
            team_id: "team1".to_string(),
            header: self.header.borrow().clone(),
        })
    }

    fn patch_channel_header(&self, channel_id: &str, header: &str) -> Result<()> {
        self.record(format!("patch_channel_header {}", channel_id))?;
        *self.header.borrow_mut() = header.to_string();
        Ok(())
    }

    fn list_bookmarks(&self, channel_id: &str) -> Result<Vec<ChannelBookmark>> {
        self.record(format!("list_bookmarks {}", channel_id))?;
        Ok(self.bookmarks.borrow().clone())
    }

    fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<()> {
        self.record(format!("create_bookmark {}", bookmark.display_name))?;
        self.created_bookmarks.borrow_mut().push(bookmark.clone());
        Ok(())
    }

    fn delete_bookmark(&self, _channel_id: &str, bookmark_id: &str) -> Result<()> {
        self.record(format!("delete_bookmark {}", bookmark_id))?;
        self.bookmarks.borrow_mut().retain(|b| b.id != bookmark_id);
        Ok(())
    }

    fn list_pinned_posts(&self, channel_id: &str) -> Result<PostList> {
        self.record(format!("list_pinned_posts {}", channel_id))?;
        Ok(PostList {
            order: self.pinned.iter().map(|p| p.id.clone()).collect(),
            posts: self.pinned.iter().map(|p| (p.id.clone(), p.clone())).collect::<HashMap<_, _>>(),
        })
    }

    fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.record(format!("create_post {}", post.channel_id))?;
        self.created_posts.borrow_mut().push(post.clone());
        Ok(Post {
            id: "newpost".to_string(),
            channel_id: post.channel_id.clone(),
            message: post.message.clone(),
        })
    }

    fn get_team(&self, team_id: &str) -> Result<Team> {
        self.record(format!("get_team {}", team_id))?;
        Ok(Team {
            id: team_id.to_string(),
            name: "acme".to_string(),
        })
    }
}

/// Answers prompts from a script. Asking a question that has no scripted
/// answer fails the test.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub bookmark_actions: VecDeque<BookmarkAction>,
    /// Keys fed to a real pinned post menu.
    pub pinned_keys: Option<Vec<MenuKey>>,
    pub header_answers: VecDeque<String>,
    pub seen_posts: Vec<PostSummary>,
    pub asked: Vec<&'static str>,
    /// Prompt that fails like a broken terminal, "pinned" or "header".
    pub fail_on: Option<&'static str>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookmark(mut self, action: BookmarkAction) -> Self {
        self.bookmark_actions.push_back(action);
        self
    }

    pub fn pinned(mut self, keys: &[MenuKey]) -> Self {
        self.pinned_keys = Some(keys.to_vec());
        self
    }

    pub fn header(mut self, answer: &str) -> Self {
        self.header_answers.push_back(answer.to_string());
        self
    }

    pub fn failing(mut self, prompt: &'static str) -> Self {
        self.fail_on = Some(prompt);
        self
    }

    fn ask(&mut self, prompt: &'static str) -> Result<()> {
        self.asked.push(prompt);
        if self.fail_on == Some(prompt) {
            anyhow::bail!("{} prompt: end of input", prompt);
        }
        Ok(())
    }
}

impl Prompter for ScriptedPrompter {
    fn bookmark_action(&mut self) -> BookmarkAction {
        self.asked.push("bookmark");
        self.bookmark_actions.pop_front().expect("unexpected bookmark prompt")
    }

    fn pinned_post(&mut self, posts: &[PostSummary]) -> Result<Option<PinnedSelection>> {
        self.ask("pinned")?;
        self.seen_posts = posts.to_vec();
        let keys = self.pinned_keys.take().expect("unexpected pinned post prompt");
        let mut menu = PinnedPostMenu::new(posts.to_vec(), POSTS_PER_PAGE);
        run_menu(&mut menu, &mut ScriptedKeys::new(keys), std::io::sink())?;
        Ok(menu.selection())
    }

    fn overwrite_header_answer(&mut self) -> Result<String> {
        self.ask("header")?;
        Ok(self.header_answers.pop_front().expect("unexpected header prompt"))
    }
}

pub fn sample_config() -> Config {
    Config {
        team: vec![Person {
            role: "Account Executive".into(),
            name: "Grace".into(),
            email: "mailto:grace@example.com".into(),
        }],
        bookmarks: vec![
            Bookmark {
                display_name: "Docs".into(),
                link_url: "https://docs.example.com".into(),
                emoji: ":book:".into(),
            },
            Bookmark {
                display_name: "Tracker".into(),
                link_url: "https://issues.example.com".into(),
                emoji: ":bug:".into(),
            },
        ],
        resources: vec![Resource {
            display_name: "Runbook".into(),
            url: "https://rb.example.com".into(),
            description: "On-call steps".into(),
        }],
    }
}
