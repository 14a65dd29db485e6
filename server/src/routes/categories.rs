use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use futures::TryStreamExt;
use mongodb::{Collection, bson::oid::ObjectId, options::ReturnDocument};

use crate::{
    error::{ApiResponse, AppError},
    schemas::{
        active_filter, by_id,
        category::{self, Category, CategoryInput, CategoryResponse},
        soft_delete_update,
    },
    state::AppState,
};

fn collection(state: &AppState) -> Collection<Category> {
    state.db.collection(category::COLLECTION)
}

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let categories: Vec<Category> = collection(&state)
        .find(active_filter())
        .await?
        .try_collect()
        .await?;

    let data: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(ApiResponse::ok(data))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?;

    let item = collection(&state)
        .find_one(by_id(oid))
        .await
        .map_err(|e| AppError::store(StatusCode::NOT_FOUND, e))?;

    match item {
        Some(item) if !item.is_delete => Ok(ApiResponse::ok(CategoryResponse::from(item))),
        _ => Err(AppError::NotFound("Category")),
    }
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse, AppError> {
    let item = Category::new(input.into_name()?);

    // the unique index turns duplicate names into a 400 here
    collection(&state)
        .insert_one(&item)
        .await
        .map_err(AppError::validation)?;

    Ok(ApiResponse::ok_with(
        CategoryResponse::from(item),
        "Category created successfully",
    ))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(AppError::validation)?;
    let name = input.into_name()?;

    let updated = collection(&state)
        .find_one_and_update(by_id(oid), category::rename_update(&name))
        .return_document(ReturnDocument::After)
        .await
        .map_err(AppError::validation)?;

    // a soft-deleted target is updated in place but reported as missing
    match updated {
        Some(item) if !item.is_delete => Ok(ApiResponse::ok_with(
            CategoryResponse::from(item),
            "Category updated successfully",
        )),
        _ => Err(AppError::NotFound("Category")),
    }
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(AppError::internal)?;

    let deleted = collection(&state)
        .find_one_and_update(by_id(oid), soft_delete_update())
        .return_document(ReturnDocument::After)
        .await?;

    match deleted {
        Some(item) => Ok(ApiResponse::ok_with(
            CategoryResponse::from(item),
            "Category marked as deleted successfully",
        )),
        None => Err(AppError::NotFound("Category")),
    }
}
