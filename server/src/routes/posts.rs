use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use futures::TryStreamExt;
use mongodb::{Collection, bson::oid::ObjectId};
use widget::{Post, PostQuery};

use crate::{
    error::AppError,
    schemas::{
        by_id,
        post::{self, CreatePostInput, PostDoc},
    },
    state::AppState,
};

fn collection(state: &AppState) -> Collection<PostDoc> {
    state.db.collection(post::COLLECTION)
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let posts: Vec<PostDoc> = collection(&state)
        .find(post::post_filter(&query))
        .await?
        .try_collect()
        .await?;

    Ok(Json(posts.into_iter().map(PostDoc::into_wire).collect()))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let oid = ObjectId::parse_str(&id).map_err(|_| AppError::NotFound("Post"))?;

    let item = collection(&state)
        .find_one(by_id(oid))
        .await?
        .ok_or(AppError::NotFound("Post"))?;

    Ok(Json(item.into_wire()))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreatePostInput>,
) -> Result<Json<Post>, AppError> {
    let item = PostDoc::new(input);

    collection(&state)
        .insert_one(&item)
        .await
        .map_err(AppError::validation)?;

    Ok(Json(item.into_wire()))
}
