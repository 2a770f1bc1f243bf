use std::fmt;

use serde::Deserialize;

/// An OAuth 2.0 client secret.
///
/// The secret is not validated; it is only ever sent to the token endpoint.
/// `Debug` output is redacted so the secret does not leak into logs.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
	pub fn new(secret: impl Into<String>) -> Self {
		Self(secret.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<String> for ClientSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for ClientSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}

impl fmt::Debug for ClientSecret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ClientSecret(<redacted>)")
	}
}
