//! HTTP transport layer, content type encoding, and client abstraction.
use http::{HeaderMap, HeaderValue, header};
use serde::Serialize;

use crate::client::OAuth2ClientError;

mod client;

pub use client::*;

#[cfg(test)]
pub(crate) use client::stub;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Validates that the response `Content-Type` header matches the expected
/// value.
///
/// Parameters such as `; charset=utf-8` are accepted.
pub fn expect_content_type(
	headers: &HeaderMap,
	expected_value: &HeaderValue,
) -> ::std::result::Result<(), OAuth2ClientError> {
	let content_type = headers
		.get(header::CONTENT_TYPE)
		.ok_or_else(|| OAuth2ClientError::response("missing content type"))?;

	if !content_type
		.as_bytes()
		.starts_with(expected_value.as_bytes())
	{
		Err(OAuth2ClientError::response("unexpected content type"))
	} else {
		Ok(())
	}
}

/// Trait for encoding request bodies with a specific content type.
pub trait ContentType {
	/// The `Content-Type` header value.
	const VALUE: HeaderValue;

	fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, OAuth2ClientError>;
}

/// URL-encoded form (`application/x-www-form-urlencoded`) content type
/// encoding.
pub struct WwwFormUrlEncoded;

impl ContentType for WwwFormUrlEncoded {
	const VALUE: HeaderValue = APPLICATION_X_WWW_FORM_URLENCODED;

	fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, OAuth2ClientError> {
		log::debug!("serializing {}", std::any::type_name_of_val(value));
		serde_html_form::to_string(value)
			.map(String::into_bytes)
			.map_err(OAuth2ClientError::request)
	}
}

/// Serializes the body of `request` with the content type `C`, setting the
/// matching `Content-Type` header.
pub fn encode_request<C: ContentType, T: Serialize>(
	request: http::Request<T>,
) -> Result<http::Request<Vec<u8>>, OAuth2ClientError> {
	let (mut parts, body) = request.into_parts();

	parts.headers.insert(header::CONTENT_TYPE, C::VALUE);

	let body = C::encode(&body)?;
	Ok(http::Request::from_parts(parts, body))
}
