//! Error responses returned by the authorization server.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// An OAuth 2.0 error response.
///
/// This is the standard error format returned by the token endpoint when a
/// request fails, as defined in
/// [RFC 6749 Section 5.2](https://datatracker.ietf.org/doc/html/rfc6749#section-5.2).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorResponse<T = String> {
	/// A single error code string, e.g. `invalid_grant`.
	pub error: T,

	/// Human-readable text providing additional information about the error.
	pub error_description: Option<String>,

	/// A URI identifying a human-readable web page with information about
	/// the error.
	pub error_uri: Option<String>,
}

impl<T> ErrorResponse<T> {
	pub fn new(error: T, error_description: Option<String>, error_uri: Option<String>) -> Self {
		Self {
			error,
			error_description,
			error_uri,
		}
	}
}

impl<T: fmt::Display> fmt::Display for ErrorResponse<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.error_description {
			Some(description) => write!(f, "{} ({description})", self.error),
			None => self.error.fmt(f),
		}
	}
}
