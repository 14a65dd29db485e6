//! Posts backing the filtering widget. Served as bare collections (no
//! envelope) since the widget consumes raw arrays.

use mongodb::bson::{Bson, Document, Regex, oid::ObjectId};
use serde::{Deserialize, Serialize};
use widget::{Post, PostQuery};

pub const COLLECTION: &str = "posts";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub views: i64,
}

impl PostDoc {
    pub fn new(input: CreatePostInput) -> Self {
        Self {
            id: ObjectId::new(),
            title: input.title,
            views: input.views,
        }
    }

    pub fn into_wire(self) -> Post {
        Post {
            id: self.id.to_hex(),
            title: self.title,
            views: self.views,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub views: i64,
}

/// Store-side form of [`PostQuery`]: inclusive view bounds plus a
/// case-insensitive, escaped substring match on the title.
pub fn post_filter(query: &PostQuery) -> Document {
    let mut filter = Document::new();

    let mut views = Document::new();
    if let Some(gte) = query.views_gte {
        views.insert("$gte", gte);
    }
    if let Some(lte) = query.views_lte {
        views.insert("$lte", lte);
    }
    if !views.is_empty() {
        filter.insert("views", views);
    }

    if let Some(term) = query.title_like.as_deref() {
        if !term.is_empty() {
            filter.insert(
                "title",
                Bson::RegularExpression(Regex {
                    pattern: regex::escape(term),
                    options: "i".to_string(),
                }),
            );
        }
    }

    filter
}
