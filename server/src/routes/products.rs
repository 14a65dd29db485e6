use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ReturnDocument,
};

use crate::{
    error::{ApiResponse, AppError},
    schemas::{
        by_id,
        category::{self, Category},
        product::{self, CreateProductInput, Product, ProductResponse, UpdateProductInput},
        soft_delete_update,
    },
    state::AppState,
};

fn collection(state: &AppState) -> Collection<Product> {
    state.db.collection(product::COLLECTION)
}

/// Resolve category references to `{id, name}` in one extra query over the
/// distinct referenced ids.
async fn populate(
    db: &Database,
    products: Vec<Product>,
) -> mongodb::error::Result<Vec<ProductResponse>> {
    let ids: Vec<ObjectId> = products.iter().filter_map(|p| p.category).collect();

    let mut names: HashMap<ObjectId, String> = HashMap::new();
    if !ids.is_empty() {
        let categories: Vec<Category> = db
            .collection(category::COLLECTION)
            .find(doc! { "_id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;

        for item in categories {
            names.insert(item.id, item.name);
        }
    }

    Ok(products
        .into_iter()
        .map(|p| ProductResponse::from_parts(p, &names))
        .collect())
}

// Product listings do not filter on isDelete; soft-deleted products stay
// visible here while category reads hide theirs.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let products: Vec<Product> = collection(&state)
        .find(doc! {})
        .await?
        .try_collect()
        .await?;

    let data = populate(&state.db, products).await?;
    Ok(ApiResponse::ok(data))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?;

    let item = collection(&state)
        .find_one(by_id(oid))
        .await
        .map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?;

    // an absent id answers success with null data; soft-deleted products
    // are returned like any other
    let data = match item {
        Some(item) => populate(&state.db, vec![item])
            .await
            .map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?
            .pop(),
        None => None,
    };

    Ok(ApiResponse::ok(data))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateProductInput>,
) -> Result<impl IntoResponse, AppError> {
    let category = input
        .category_id()
        .map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?;

    let item = Product::new(input.name, input.price, input.description, category);

    collection(&state)
        .insert_one(&item)
        .await
        .map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?;

    let data = populate(&state.db, vec![item])
        .await
        .map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?
        .pop();
    Ok(ApiResponse::ok(data))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProductInput>,
) -> Result<impl IntoResponse, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(AppError::validation)?;

    let updated = match input.update_doc().map_err(AppError::validation)? {
        Some(update) => collection(&state)
            .find_one_and_update(by_id(oid), update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(AppError::validation)?,
        // a body naming no fields reads the document back unchanged
        None => collection(&state)
            .find_one(by_id(oid))
            .await
            .map_err(AppError::validation)?,
    };

    let data = match updated {
        Some(item) => populate(&state.db, vec![item])
            .await
            .map_err(AppError::validation)?
            .pop(),
        None => None,
    };

    Ok(ApiResponse::ok(data))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(AppError::internal)?;

    let deleted = collection(&state)
        .find_one_and_update(by_id(oid), soft_delete_update())
        .return_document(ReturnDocument::After)
        .await?;

    match deleted {
        Some(item) => {
            let data = populate(&state.db, vec![item]).await?.pop();
            Ok(ApiResponse::ok_with(
                data,
                "Product marked as deleted successfully",
            ))
        }
        None => Err(AppError::NotFound("Product")),
    }
}
