//! Extractors that reject with [`ApiError`] instead of axum's plain-text
//! rejections, so malformed input also answers with `{"detail"}` and 422.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};
use axum::Json;

use crate::error::ApiError;

#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ValidQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ValidPath<T>(pub T);
