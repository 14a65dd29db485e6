//! Category schema: `name` is required, unique, and stored trimmed.
//! Deleted categories stay in the collection with `isDelete` set.

use chrono::{DateTime, Utc};
use mongodb::bson::{
    self, Document, doc, oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const COLLECTION: &str = "categories";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(rename = "isDelete", default)]
    pub is_delete: bool,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name,
            is_delete: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "isDelete")]
    pub is_delete: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            is_delete: category.is_delete,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Body for category create and update. Both operations take the same
/// single whitelisted field.
#[derive(Debug, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,
}

impl CategoryInput {
    pub fn into_name(self) -> Result<String, AppError> {
        let name = self
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or_default();

        if name.is_empty() {
            return Err(AppError::validation("Category name is required"));
        }

        Ok(name)
    }
}

pub fn rename_update(name: &str) -> Document {
    doc! { "$set": { "name": name, "updatedAt": bson::DateTime::now() } }
}

#[cfg(test)]
mod tests {
    use super::{CategoryInput, rename_update};

    #[test]
    fn name_is_trimmed() {
        let input = CategoryInput {
            name: Some("  Electronics  ".to_string()),
        };
        assert_eq!(input.into_name().unwrap(), "Electronics");
    }

    #[test]
    fn missing_name_is_rejected() {
        assert!(CategoryInput { name: None }.into_name().is_err());
    }

    #[test]
    fn blank_name_is_rejected() {
        let input = CategoryInput {
            name: Some("   ".to_string()),
        };
        assert!(input.into_name().is_err());
    }

    #[test]
    fn rename_bumps_updated_at() {
        let update = rename_update("Books");
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("name").unwrap(), "Books");
        assert!(set.contains_key("updatedAt"));
    }
}
