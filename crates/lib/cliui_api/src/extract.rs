//! Request extractors reporting failures as `AppError`.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json<T>` whose rejections (bad JSON, wrong content type, missing or
/// mistyped fields) become 400 validation errors with the usual error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);
