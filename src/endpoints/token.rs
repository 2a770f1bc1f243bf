use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_with::skip_serializing_none;

use crate::{
	AccessTokenBuf, Scope,
	client::OAuth2ClientError,
	endpoints::{Endpoint, RequestBuilder},
	server::ErrorResponse,
	transport::{APPLICATION_JSON, expect_content_type},
};

/// Token endpoint, where grants are exchanged for access tokens.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.2>
pub struct TokenEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> Clone for TokenEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for TokenEndpoint<'a, C> {}

impl<'a, C> TokenEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}

	pub fn begin<T>(self, request: T) -> RequestBuilder<Self, T> {
		RequestBuilder::new(self, request)
	}
}

impl<'a, C> Endpoint for TokenEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}
}

/// Successful token endpoint response.
///
/// Only `access_token` is required. Fields the server adds on top of RFC
/// 6749, such as Doorkeeper's `created_at`, are ignored.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenResponse {
	/// access token issued by the authorization server.
	pub access_token: AccessTokenBuf,

	/// The type of the token issued as described in Section 7.1.  Value is case insensitive.
	#[serde(default)]
	pub token_type: Option<String>,

	/// Lifetime in seconds of the access token.
	#[serde(default)]
	pub expires_in: Option<u64>,

	/// The refresh token, which can be used to obtain new access tokens using
	/// the same authorization grant.
	#[serde(default)]
	pub refresh_token: Option<String>,

	/// Scope of the access token, as sent by the server.
	///
	/// Not validated: the token stays usable whatever the server puts here.
	#[serde(default)]
	pub scope: Option<String>,
}

impl TokenResponse {
	pub fn new(access_token: AccessTokenBuf) -> Self {
		Self {
			access_token,
			token_type: None,
			expires_in: None,
			refresh_token: None,
			scope: None,
		}
	}

	/// Parsed [`scope`](Self::scope), if the server sent a valid one.
	pub fn scope(&self) -> Option<&Scope> {
		self.scope.as_deref().and_then(|s| Scope::new(s).ok())
	}
}

/// Decodes a token endpoint response.
///
/// Any non-2xx status is an error. When the server sent an RFC 6749
/// error body it is kept in [`OAuth2ClientError::ErrorResponse`].
pub fn decode_token_response<T>(
	response: http::Response<Vec<u8>>,
) -> Result<http::Response<T>, OAuth2ClientError>
where
	T: DeserializeOwned,
{
	let status = response.status();
	if !status.is_success() {
		return match serde_json::from_slice::<ErrorResponse>(response.body()) {
			Ok(error) => Err(OAuth2ClientError::error_response(status, error)),
			Err(_) => Err(OAuth2ClientError::server(status)),
		};
	}

	expect_content_type(response.headers(), &APPLICATION_JSON)?;

	let body = serde_json::from_slice(response.body()).map_err(OAuth2ClientError::response)?;

	Ok(response.map(|_| body))
}
