//! Shared wire types for the posts page plus the filtering model behind it.
//!
//! The server serves `Post` collections and accepts `PostQuery` parameters;
//! [`FilterPanel`] is the page-side state machine that produces those
//! queries and filters the loaded collection locally.

use serde::{Deserialize, Serialize};

pub mod panel;

pub use panel::FilterPanel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub views: i64,
}

/// Query parameters for `GET /posts`. Both range bounds are inclusive;
/// `title_like` is a case-insensitive substring match against the title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_gte: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_lte: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_like: Option<String>,
}

impl PostQuery {
    /// Local equivalent of the server-side filter: both filters compose
    /// with logical AND.
    pub fn matches(&self, post: &Post) -> bool {
        if self.views_gte.is_some_and(|gte| post.views < gte) {
            return false;
        }
        if self.views_lte.is_some_and(|lte| post.views > lte) {
            return false;
        }
        match self.title_like.as_deref() {
            Some(term) if !term.is_empty() => {
                post.title.to_lowercase().contains(&term.to_lowercase())
            }
            _ => true,
        }
    }
}
