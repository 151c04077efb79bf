//! `Json` and `Path` extractors whose rejections render as [`AppError`].
//!
//! axum's own extractors answer a malformed body or path segment with a
//! plain-text response. These wrappers route the same rejections through
//! [`AppError::Rejected`] so every error leaves in the `{ "error", "code" }`
//! shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
