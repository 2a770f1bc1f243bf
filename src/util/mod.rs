//! URI query string utilities.
use serde::Serialize;

use crate::client::OAuth2ClientError;

/// Serializes `value` as `application/x-www-form-urlencoded` and appends the
/// result to the query of `uri`.
///
/// Existing query parameters on the URI are preserved.
pub fn extend_uri_query<T: Serialize>(uri: &str, value: &T) -> Result<String, OAuth2ClientError> {
	let query = serde_html_form::to_string(value).map_err(OAuth2ClientError::request)?;
	Ok(concat_query(uri, &query))
}

/// Appends `query` to `uri`, with `?` if the URI has no query yet and `&`
/// otherwise.
///
/// If `query` is empty, the URI is returned as-is.
pub fn concat_query(uri: &str, query: &str) -> String {
	if query.is_empty() {
		return uri.to_owned();
	}

	let separator = match uri.rfind('?') {
		None => "?",
		Some(i) if i + 1 == uri.len() || uri.ends_with('&') => "",
		Some(_) => "&",
	};

	format!("{uri}{separator}{query}")
}

/// Percent-encodes a single value the way `application/x-www-form-urlencoded`
/// does.
pub fn form_urlencode(value: &str) -> Result<String, OAuth2ClientError> {
	let encoded =
		serde_html_form::to_string(&[("v", value)][..]).map_err(OAuth2ClientError::request)?;
	Ok(encoded
		.strip_prefix("v=")
		.map(ToOwned::to_owned)
		.unwrap_or_default())
}
