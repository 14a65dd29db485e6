//! Product schema. `category` holds a reference to a category document;
//! the reference is never enforced and may dangle. Reads resolve it to
//! `{id, name}` after the fact (see the products routes).

use std::collections::HashMap;

use mongodb::bson::{Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "products";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Option<ObjectId>,
    #[serde(rename = "isDelete", default)]
    pub is_delete: bool,
}

impl Product {
    pub fn new(name: String, price: f64, description: String, category: Option<ObjectId>) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            price,
            description,
            category,
            is_delete: false,
        }
    }
}

/// The populated form of the reference: just the fields a listing needs.
#[derive(Debug, Serialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: Option<CategoryRef>,
    #[serde(rename = "isDelete")]
    pub is_delete: bool,
}

impl ProductResponse {
    /// Embed the referenced category's name, if the reference resolves.
    /// Dangling references populate to null rather than failing.
    pub fn from_parts(product: Product, category_names: &HashMap<ObjectId, String>) -> Self {
        let category = product.category.and_then(|id| {
            category_names.get(&id).map(|name| CategoryRef {
                id: id.to_hex(),
                name: name.clone(),
            })
        });

        Self {
            id: product.id.to_hex(),
            name: product.name,
            price: product.price,
            description: product.description,
            category,
            is_delete: product.is_delete,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
}

impl CreateProductInput {
    pub fn category_id(&self) -> Result<Option<ObjectId>, String> {
        parse_category(self.category.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl UpdateProductInput {
    /// Build a `$set` for the fields actually present in the body. `None`
    /// means the body named no updatable field at all.
    pub fn update_doc(&self) -> Result<Option<Document>, String> {
        let mut set = Document::new();

        if let Some(name) = &self.name {
            set.insert("name", name);
        }
        if let Some(price) = self.price {
            set.insert("price", price);
        }
        if let Some(description) = &self.description {
            set.insert("description", description);
        }
        if let Some(category) = parse_category(self.category.as_deref())? {
            set.insert("category", category);
        }

        if set.is_empty() {
            return Ok(None);
        }
        Ok(Some(doc! { "$set": set }))
    }
}

fn parse_category(category: Option<&str>) -> Result<Option<ObjectId>, String> {
    match category {
        None => Ok(None),
        Some(id) => ObjectId::parse_str(id)
            .map(Some)
            .map_err(|_| format!("Invalid category id: {id}")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mongodb::bson::oid::ObjectId;

    use super::{CreateProductInput, Product, ProductResponse, UpdateProductInput};

    #[test]
    fn update_doc_covers_only_present_fields() {
        let input = UpdateProductInput {
            price: Some(12.5),
            ..Default::default()
        };

        let update = input.update_doc().unwrap().unwrap();
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_f64("price").unwrap(), 12.5);
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("category"));
    }

    #[test]
    fn empty_body_produces_no_update() {
        assert_eq!(UpdateProductInput::default().update_doc(), Ok(None));
    }

    #[test]
    fn malformed_category_reference_is_rejected() {
        let input = UpdateProductInput {
            category: Some("not-an-id".to_string()),
            ..Default::default()
        };
        assert!(input.update_doc().is_err());

        let input = CreateProductInput {
            name: "Laptop".to_string(),
            price: 1.0,
            description: String::new(),
            category: Some("nope".to_string()),
        };
        assert!(input.category_id().is_err());
    }

    #[test]
    fn population_embeds_the_resolved_name() {
        let category_id = ObjectId::new();
        let mut names = HashMap::new();
        names.insert(category_id, "Electronics".to_string());

        let product = Product::new("Laptop".to_string(), 999.0, "13 inch".to_string(), Some(category_id));
        let response = ProductResponse::from_parts(product, &names);

        let populated = response.category.unwrap();
        assert_eq!(populated.name, "Electronics");
        assert_eq!(populated.id, category_id.to_hex());
    }

    #[test]
    fn dangling_reference_populates_to_null() {
        let product = Product::new("Laptop".to_string(), 999.0, String::new(), Some(ObjectId::new()));
        let response = ProductResponse::from_parts(product, &HashMap::new());

        assert!(response.category.is_none());
    }
}
