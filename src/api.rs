// API client module: a small blocking HTTP client for the parts of the
// Mattermost REST API v4 this tool touches (channels, bookmarks, posts,
// teams). The workflow code only sees the `ChannelApi` trait, which keeps the
// flows testable without a server.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Subset of the Mattermost channel object.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Channel {
    pub id: String,
    #[serde(default)]
    pub team_id: String,
    #[serde(default)]
    pub header: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Team {
    pub id: String,
    pub name: String,
}

/// A bookmark as returned by the server.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ChannelBookmark {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub link_url: String,
}

/// Payload for creating a link bookmark.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub channel_id: String,
    pub display_name: String,
    pub link_url: String,
    pub emoji: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl NewBookmark {
    pub fn link(channel_id: &str, display_name: &str, link_url: &str, emoji: &str) -> Self {
        NewBookmark {
            channel_id: channel_id.to_string(),
            display_name: display_name.to_string(),
            link_url: link_url.to_string(),
            emoji: emoji.to_string(),
            kind: "link".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub message: String,
}

/// Payload for `POST /posts`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub channel_id: String,
    pub message: String,
    pub is_pinned: bool,
}

/// Posts keyed by id, plus the display order chosen by the server.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PostList {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub posts: HashMap<String, Post>,
}

impl PostList {
    /// Posts in server order. Ids listed in `order` without a matching post
    /// are skipped.
    pub fn ordered(&self) -> impl Iterator<Item = &Post> {
        self.order.iter().filter_map(|id| self.posts.get(id))
    }
}

#[derive(Serialize, Debug)]
struct ChannelPatch<'a> {
    header: &'a str,
}

/// Remote operations the setup workflow needs. Every call either succeeds or
/// returns an error describing the transport failure or unexpected status.
pub trait ChannelApi {
    /// Server root, e.g. `https://mm.example.com:443`. Used to build permalinks.
    fn base_url(&self) -> &str;
    fn get_channel(&self, channel_id: &str) -> Result<Channel>;
    fn patch_channel_header(&self, channel_id: &str, header: &str) -> Result<()>;
    fn list_bookmarks(&self, channel_id: &str) -> Result<Vec<ChannelBookmark>>;
    fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<()>;
    fn delete_bookmark(&self, channel_id: &str, bookmark_id: &str) -> Result<()>;
    fn list_pinned_posts(&self, channel_id: &str) -> Result<PostList>;
    fn create_post(&self, post: &NewPost) -> Result<Post>;
    fn get_team(&self, team_id: &str) -> Result<Team>;
}

/// Blocking client holding the reqwest client, the server root and the
/// bearer token (baked into the default headers).
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for `base_url` that authenticates every request with
    /// `token`.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Auth token contains invalid header characters")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v4{}", self.base_url, path)
    }
}

/// Turn any status outside `accepted` into an error carrying the body text.
fn check_status(res: Response, accepted: &[StatusCode], call: &str) -> Result<Response> {
    let status = res.status();
    if !accepted.contains(&status) {
        let txt = res.text().unwrap_or_else(|_| "".into());
        anyhow::bail!("{} returned bad HTTP response: {} - {}", call, status, txt);
    }
    Ok(res)
}

const OK: &[StatusCode] = &[StatusCode::OK];
const OK_OR_CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const CREATED: &[StatusCode] = &[StatusCode::CREATED];

impl ChannelApi for ApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        let url = self.endpoint(&format!("/channels/{}", channel_id));
        debug!("GET {}", url);
        let res = self.client.get(&url).send().context("Failed to send GetChannel request")?;
        let res = check_status(res, OK, "GetChannel")?;
        res.json().context("Parsing channel response json")
    }

    fn patch_channel_header(&self, channel_id: &str, header: &str) -> Result<()> {
        let url = self.endpoint(&format!("/channels/{}/patch", channel_id));
        debug!("PUT {}", url);
        let res = self
            .client
            .put(&url)
            .json(&ChannelPatch { header })
            .send()
            .context("Failed to send PatchChannel request")?;
        check_status(res, OK, "PatchChannel")?;
        Ok(())
    }

    fn list_bookmarks(&self, channel_id: &str) -> Result<Vec<ChannelBookmark>> {
        let url = self.endpoint(&format!("/channels/{}/bookmarks", channel_id));
        debug!("GET {}", url);
        let res = self
            .client
            .get(&url)
            .query(&[("bookmarks_since", "0")])
            .send()
            .context("Failed to send ListChannelBookmarks request")?;
        let res = check_status(res, OK_OR_CREATED, "ListChannelBookmarks")?;
        res.json().context("Parsing bookmark list json")
    }

    fn create_bookmark(&self, bookmark: &NewBookmark) -> Result<()> {
        let url = self.endpoint(&format!("/channels/{}/bookmarks", bookmark.channel_id));
        debug!("POST {} ({})", url, bookmark.display_name);
        let res = self
            .client
            .post(&url)
            .json(bookmark)
            .send()
            .context("Failed to send CreateChannelBookmark request")?;
        check_status(res, OK_OR_CREATED, "CreateChannelBookmark")?;
        Ok(())
    }

    fn delete_bookmark(&self, channel_id: &str, bookmark_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("/channels/{}/bookmarks/{}", channel_id, bookmark_id));
        debug!("DELETE {}", url);
        let res = self
            .client
            .delete(&url)
            .send()
            .context("Failed to send DeleteChannelBookmark request")?;
        check_status(res, OK_OR_CREATED, "DeleteChannelBookmark")?;
        Ok(())
    }

    fn list_pinned_posts(&self, channel_id: &str) -> Result<PostList> {
        let url = self.endpoint(&format!("/channels/{}/pinned", channel_id));
        debug!("GET {}", url);
        let res = self.client.get(&url).send().context("Failed to send GetPinnedPosts request")?;
        let res = check_status(res, OK, "GetPinnedPosts")?;
        res.json().context("Parsing pinned posts json")
    }

    fn create_post(&self, post: &NewPost) -> Result<Post> {
        let url = self.endpoint("/posts");
        debug!("POST {}", url);
        let res = self
            .client
            .post(&url)
            .json(post)
            .send()
            .context("Failed to send CreatePost request")?;
        // Post creation answers 201, not the usual 200
        let res = check_status(res, CREATED, "CreatePost")?;
        res.json().context("Parsing created post json")
    }

    fn get_team(&self, team_id: &str) -> Result<Team> {
        let url = self.endpoint(&format!("/teams/{}", team_id));
        debug!("GET {}", url);
        let res = self.client.get(&url).send().context("Failed to send GetTeam request")?;
        let res = check_status(res, OK, "GetTeam")?;
        res.json().context("Parsing team response json")
    }
}
