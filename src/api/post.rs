//! Post and comment endpoints

use crate::api::Page;
use crate::client::Client;
use crate::error::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Feed filter tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTab {
    /// Most recently active posts
    Latest,
    /// Newest posts
    New,
    /// Trending posts
    Hot,
    /// The authenticated user's own posts
    My,
}

impl PostTab {
    fn as_str(&self) -> &'static str {
        match self {
            PostTab::Latest => "latest",
            PostTab::New => "new",
            PostTab::Hot => "hot",
            PostTab::My => "my",
        }
    }
}

/// Query parameters for the post feed.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// Feed tab
    pub tab: Option<PostTab>,
    /// Restrict to one club
    pub club_id: Option<i64>,
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Page size
    pub size: Option<u32>,
}

impl PostQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(tab) = self.tab {
            params.push(("tab", tab.as_str().to_string()));
        }
        if let Some(club_id) = self.club_id {
            params.push(("clubId", club_id.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        params
    }
}

/// A post as the backend renders it for the feed and the detail view.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub images: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,

    pub club_id: Option<i64>,
    pub club_name: Option<String>,
    pub club_color: Option<String>,

    pub user_id: Option<i64>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    pub is_anonymous: Option<bool>,

    pub view_count: Option<i64>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,

    pub pinned: Option<bool>,
    pub is_hot: Option<bool>,

    pub participants: Option<Vec<Participant>>,

    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub last_active_time: Option<String>,
}

/// A user shown in a post's participant strip.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub user_id: i64,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

/// A comment, possibly carrying its replies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub id: i64,
    pub post_id: Option<i64>,
    pub user_id: Option<i64>,
    pub author_name: Option<String>,
    pub author_avatar: Option<String>,
    pub content: String,
    pub parent_id: Option<i64>,
    pub like_count: Option<i64>,
    pub is_liked: Option<bool>,
    pub is_owner: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
    pub created_at_text: Option<String>,
    pub replies: Option<Vec<Comment>>,
    pub reply_to_name: Option<String>,
}

/// Payload for creating or updating a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub is_anonymous: bool,
}

/// Payload for creating or updating a comment. A `parent_id` of 0 marks
/// a top-level comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub parent_id: i64,
}

impl NewComment {
    /// A top-level comment.
    pub fn top_level(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: 0,
        }
    }

    /// A reply to another comment.
    pub fn reply(content: impl Into<String>, parent_id: i64) -> Self {
        Self {
            content: content.into(),
            parent_id,
        }
    }
}

impl Client {
    /// Fetch a page of the post feed.
    pub async fn posts(&self, query: &PostQuery) -> Result<Page<Post>> {
        let data = self.get("/post/list", &query.params()).await?;
        Client::parse(data)
    }

    /// Fetch one post.
    pub async fn post_detail(&self, post_id: i64) -> Result<Post> {
        let data = self.get(&format!("/post/{}", post_id), &[]).await?;
        Client::parse(data)
    }

    /// Publish a post.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let data = self
            .post("/post", Some(&serde_json::to_value(post)?))
            .await?;
        Client::parse(data)
    }

    /// Update a post.
    pub async fn update_post(&self, post_id: i64, post: &NewPost) -> Result<Post> {
        let data = self
            .put(&format!("/post/{}", post_id), &serde_json::to_value(post)?)
            .await?;
        Client::parse(data)
    }

    /// Delete a post.
    pub async fn delete_post(&self, post_id: i64) -> Result<()> {
        self.delete(&format!("/post/{}", post_id)).await?;
        Ok(())
    }

    /// Fetch the comments of a post.
    pub async fn comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        let data = self.get(&format!("/post/{}/comments", post_id), &[]).await?;
        Client::parse(data)
    }

    /// Publish a comment on a post.
    pub async fn create_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment> {
        let data = self
            .post(
                &format!("/post/{}/comments", post_id),
                Some(&serde_json::to_value(comment)?),
            )
            .await?;
        Client::parse(data)
    }

    /// Edit a comment.
    pub async fn update_comment(&self, comment_id: i64, comment: &NewComment) -> Result<Comment> {
        let data = self
            .put(
                &format!("/post/comments/{}", comment_id),
                &serde_json::to_value(comment)?,
            )
            .await?;
        Client::parse(data)
    }

    /// Delete a comment.
    pub async fn delete_comment(&self, comment_id: i64) -> Result<()> {
        self.delete(&format!("/post/comments/{}", comment_id)).await?;
        Ok(())
    }

    /// Like a post.
    pub async fn like_post(&self, post_id: i64) -> Result<()> {
        self.post(&format!("/post/{}/like", post_id), None).await?;
        Ok(())
    }

    /// Withdraw a like.
    pub async fn unlike_post(&self, post_id: i64) -> Result<()> {
        self.delete(&format!("/post/{}/like", post_id)).await?;
        Ok(())
    }
}
