//! # MongoDB
//!
//! Document store behind every resource. One collection per resource
//! (`categories`, `products`, `posts`); all mutations go through the
//! driver's insert/find-and-update primitives, and deletes only ever flip
//! the `isDelete` flag.
//!
//! The client connects lazily. A failed startup ping is logged and the
//! process keeps serving; requests fail with 500s until connectivity
//! returns.

use std::time::Duration;

use mongodb::{
    Client, Database, IndexModel,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};
use tracing::{info, warn};

use crate::{config::Config, schemas::category};

pub async fn init_mongo(config: &Config) -> Database {
    let mut options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .expect("Invalid MongoDB URI");
    options.server_selection_timeout = Some(Duration::from_secs(2));

    let client = Client::with_options(options).expect("Failed to build MongoDB client");
    let db = client.database(&config.mongodb_db);

    match db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => info!("MongoDB connected"),
        Err(e) => warn!("MongoDB connection error: {e}"),
    }

    if let Err(e) = ensure_indexes(&db).await {
        warn!("Failed to create indexes: {e}");
    }

    db
}

// Category names are unique across deleted and live documents alike; the
// index is on the bare field, not scoped to isDelete.
async fn ensure_indexes(db: &Database) -> mongodb::error::Result<()> {
    let index = IndexModel::builder()
        .keys(doc! { "name": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    db.collection::<category::Category>(category::COLLECTION)
        .create_index(index)
        .await?;

    Ok(())
}
