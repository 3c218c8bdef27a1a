//! Rejection plumbing for extractors that cannot fail.

use std::convert::Infallible;

use axum::http::StatusCode;

/// Rejection type for infallible extractors.
///
/// `Infallible` has no values, so this type can never be constructed; it
/// exists only to satisfy the `FromRequestParts` associated-type bound while
/// making "this extractor always succeeds" part of the signature.
pub(crate) type InfallibleRejection = (StatusCode, Infallible);
