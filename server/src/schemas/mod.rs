//! Document schemas plus the query model shared by every resource:
//! lookups by id, the live-documents filter, and the soft-delete update.
//! Deletion never removes a document; it flips `isDelete` and reads that
//! choose to hide deleted documents filter on the same flag.

use mongodb::bson::{Document, doc, oid::ObjectId};

pub mod category;
pub mod post;
pub mod product;

pub fn by_id(id: ObjectId) -> Document {
    doc! { "_id": id }
}

pub fn active_filter() -> Document {
    doc! { "isDelete": false }
}

pub fn soft_delete_update() -> Document {
    doc! { "$set": { "isDelete": true } }
}
