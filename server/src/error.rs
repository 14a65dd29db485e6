use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Paths under these prefixes get JSON errors from the fallback responder;
/// everything else gets the HTML error page.
pub const JSON_ERROR_PREFIXES: [&str; 5] =
    ["/api", "/products", "/categories", "/users", "/comments"];

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Store { status: StatusCode, message: String },
}

impl AppError {
    pub fn validation(err: impl ToString) -> Self {
        Self::Validation(err.to_string())
    }

    /// A store failure surfaced with a route-specific status. Each handler
    /// maps its own failures; the statuses are not uniform across routes.
    pub fn store(status: StatusCode, err: impl ToString) -> Self {
        Self::Store {
            status,
            message: err.to_string(),
        }
    }

    pub fn internal(err: impl ToString) -> Self {
        Self::store(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store { status, .. } => *status,
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::internal(err)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// The uniform response wrapper: `{success, data, message?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            message: None,
        })
    }

    pub fn ok_with(data: T, message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            message: Some(message.to_string()),
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiResponse {
            success: false,
            data: ErrorBody {
                message: self.to_string(),
            },
            message: None,
        };

        (status, Json(body)).into_response()
    }
}

pub fn error_response(path: &str, status: StatusCode, message: &str) -> Response {
    if JSON_ERROR_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        let body = json!({
            "success": false,
            "error": message,
            "status": status.as_u16(),
        });
        return (status, Json(body)).into_response();
    }

    let page = format!(
        "<!DOCTYPE html><html><head><title>Error</title></head>\
         <body><h1>{}</h1><p>{}</p></body></html>",
        status, message
    );
    (status, Html(page)).into_response()
}

pub async fn fallback(uri: Uri) -> Response {
    error_response(uri.path(), StatusCode::NOT_FOUND, "Not Found")
}
