//! Authorization Code Grant.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1>
use base64::{Engine, prelude::BASE64_STANDARD};
use http::{HeaderValue, header};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
	ClientId, ClientSecret, Code, Scope,
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::{
		HttpRequest, RedirectRequest, RequestBuilder,
		authorization::AuthorizationEndpoint,
		token::{TokenEndpoint, TokenResponse, decode_token_response},
	},
	transport::{APPLICATION_JSON, HttpClient, WwwFormUrlEncoded},
	util::form_urlencode,
};

impl<'a, C> AuthorizationEndpoint<'a, C>
where
	C: OAuth2Client,
{
	/// Starts an authorization request with `response_type=code`.
	pub fn authorize_code(
		self,
		redirect_uri: Option<&'a str>,
		scope: Option<&'a Scope>,
	) -> RequestBuilder<Self, AuthorizationCodeRequest<'a>> {
		let client_id = self.client.client_id();
		self.begin(AuthorizationCodeRequest::new(client_id, redirect_uri, scope))
	}
}

impl<'a, C> TokenEndpoint<'a, C> {
	/// Starts a token request exchanging `code`.
	///
	/// `redirect_uri` must be the one used in the authorization request.
	pub fn exchange_code(
		self,
		code: &'a Code,
		redirect_uri: Option<&'a str>,
	) -> RequestBuilder<Self, AuthorizationCodeTokenRequest<'a>> {
		self.begin(AuthorizationCodeTokenRequest::new(code, redirect_uri))
	}
}

/// Authorization Request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1>
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "response_type", rename = "code")]
pub struct AuthorizationCodeRequest<'a> {
	pub client_id: &'a str,

	pub redirect_uri: Option<&'a str>,

	pub scope: Option<&'a str>,
}

impl<'a> AuthorizationCodeRequest<'a> {
	pub fn new(
		client_id: &'a ClientId,
		redirect_uri: Option<&'a str>,
		scope: Option<&'a Scope>,
	) -> Self {
		Self {
			client_id: client_id.as_str(),
			redirect_uri,
			scope: scope.map(Scope::as_str),
		}
	}
}

impl RedirectRequest for AuthorizationCodeRequest<'_> {
	type RequestBody<'b>
		= &'b Self
	where
		Self: 'b;

	fn build_query(&self) -> Self::RequestBody<'_> {
		self
	}
}

/// Access Token Request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct AuthorizationCodeTokenRequest<'a> {
	pub code: &'a str,

	pub redirect_uri: Option<&'a str>,
}

impl<'a> AuthorizationCodeTokenRequest<'a> {
	pub fn new(code: &'a Code, redirect_uri: Option<&'a str>) -> Self {
		Self {
			code: code.as_str(),
			redirect_uri,
		}
	}
}

impl<'a, C> HttpRequest<TokenEndpoint<'a, C>> for AuthorizationCodeTokenRequest<'_> {
	type ContentType = WwwFormUrlEncoded;
	type RequestBody<'b>
		= &'b Self
	where
		Self: 'b;
	type ResponsePayload = TokenResponse;
	type Response = TokenResponse;

	async fn build_request(
		&self,
		endpoint: &TokenEndpoint<'a, C>,
		_http_client: &impl HttpClient,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		http::Request::builder()
			.method(http::Method::POST)
			.uri(endpoint.uri)
			.header(header::ACCEPT, APPLICATION_JSON)
			.body(self)
			.map_err(OAuth2ClientError::request)
	}

	fn decode_response(
		&self,
		_endpoint: &TokenEndpoint<'a, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<http::Response<Self::ResponsePayload>, OAuth2ClientError> {
		decode_token_response(response)
	}

	async fn process_response(
		&self,
		_endpoint: &TokenEndpoint<'a, C>,
		_http_client: &impl HttpClient,
		response: http::Response<Self::ResponsePayload>,
	) -> Result<Self::Response, OAuth2ClientError> {
		Ok(response.into_body())
	}
}

/// How the client authenticates against the token endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	/// `client_id` and `client_secret` in the form body.
	#[default]
	ClientSecretPost,

	/// HTTP Basic authentication header.
	ClientSecretBasic,
}

/// Form parameters added by [`WithClientSecret`].
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCredentials<'a, T> {
	#[serde(flatten)]
	pub value: T,

	pub client_id: Option<&'a str>,

	pub client_secret: Option<&'a str>,
}

/// Extension wrapper that authenticates a token request with the client
/// secret.
pub struct WithClientSecret<'a, T> {
	pub method: ClientAuthMethod,

	pub client_id: &'a ClientId,

	pub client_secret: &'a ClientSecret,

	pub value: T,
}

impl<'a, T> WithClientSecret<'a, T> {
	pub fn new(
		value: T,
		method: ClientAuthMethod,
		client_id: &'a ClientId,
		client_secret: &'a ClientSecret,
	) -> Self {
		Self {
			method,
			client_id,
			client_secret,
			value,
		}
	}

	fn basic_authorization(&self) -> Result<HeaderValue, OAuth2ClientError> {
		let credentials = format!(
			"{}:{}",
			form_urlencode(self.client_id.as_str())?,
			form_urlencode(self.client_secret.as_str())?
		);

		let mut value = HeaderValue::try_from(format!(
			"Basic {}",
			BASE64_STANDARD.encode(credentials)
		))
		.map_err(OAuth2ClientError::request)?;
		value.set_sensitive(true);
		Ok(value)
	}
}

impl<'a, T> std::ops::Deref for WithClientSecret<'a, T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.value
	}
}

impl<'a, E, T> HttpRequest<E> for WithClientSecret<'a, T>
where
	T: HttpRequest<E>,
{
	type ContentType = T::ContentType;
	type RequestBody<'b>
		= ClientCredentials<'b, T::RequestBody<'b>>
	where
		Self: 'b;
	type Response = T::Response;
	type ResponsePayload = T::ResponsePayload;

	async fn build_request(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError> {
		let request = self.value.build_request(endpoint, http_client).await?;

		match self.method {
			ClientAuthMethod::ClientSecretPost => Ok(request.map(|value| ClientCredentials {
				value,
				client_id: Some(self.client_id.as_str()),
				client_secret: Some(self.client_secret.as_str()),
			})),
			ClientAuthMethod::ClientSecretBasic => {
				let (mut parts, value) = request.into_parts();
				parts
					.headers
					.insert(header::AUTHORIZATION, self.basic_authorization()?);
				Ok(http::Request::from_parts(
					parts,
					ClientCredentials {
						value,
						client_id: None,
						client_secret: None,
					},
				))
			}
		}
	}

	fn decode_response(
		&self,
		endpoint: &E,
		response: http::Response<Vec<u8>>,
	) -> Result<http::Response<Self::ResponsePayload>, OAuth2ClientError> {
		self.value.decode_response(endpoint, response)
	}

	async fn process_response(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
		response: http::Response<Self::ResponsePayload>,
	) -> Result<Self::Response, OAuth2ClientError> {
		self.value
			.process_response(endpoint, http_client, response)
			.await
	}
}

/// Extension trait for authenticating a [`RequestBuilder`] with the client
/// secret.
pub trait AddClientSecret<'a> {
	type Output;

	fn with_client_secret(
		self,
		method: ClientAuthMethod,
		client_id: &'a ClientId,
		client_secret: &'a ClientSecret,
	) -> Self::Output;
}

impl<'a, E, T> AddClientSecret<'a> for RequestBuilder<E, T> {
	type Output = RequestBuilder<E, WithClientSecret<'a, T>>;

	fn with_client_secret(
		self,
		method: ClientAuthMethod,
		client_id: &'a ClientId,
		client_secret: &'a ClientSecret,
	) -> Self::Output {
		self.map(|value| WithClientSecret::new(value, method, client_id, client_secret))
	}
}

#[cfg(test)]
mod tests {
	use http::StatusCode;

	use crate::{
		ClientIdBuf, ScopeBuf,
		endpoints::AddState,
		transport::{APPLICATION_X_WWW_FORM_URLENCODED, stub::StubClient},
	};

	use super::*;

	struct TestClient(ClientIdBuf);

	impl OAuth2Client for TestClient {
		fn client_id(&self) -> &ClientId {
			self.0.as_client_id()
		}
	}

	fn test_client() -> TestClient {
		TestClient(ClientIdBuf::new("app-uid".to_owned()).unwrap())
	}

	const TOKEN_BODY: &str = r#"{"access_token":"at-1","token_type":"Bearer","expires_in":7200,"refresh_token":"rt-1"}"#;

	#[test]
	fn authorization_query() {
		let client = test_client();
		let scope = ScopeBuf::new("with_roles".to_owned()).unwrap();
		let uri = AuthorizationEndpoint::new(&client, "https://db.scout.ch/oauth/authorize")
			.authorize_code(Some("https://app.example.org/callback"), Some(&scope))
			.with_state(Some("xyz".to_owned()))
			.into_uri()
			.unwrap();

		assert_eq!(
			uri,
			"https://db.scout.ch/oauth/authorize?response_type=code&client_id=app-uid\
			&redirect_uri=https%3A%2F%2Fapp.example.org%2Fcallback&scope=with_roles&state=xyz"
		);
	}

	#[test]
	fn authorization_query_skips_missing_parameters() {
		let client = test_client();
		let uri = AuthorizationEndpoint::new(&client, "https://db.scout.ch/oauth/authorize")
			.authorize_code(None, None)
			.with_state(None)
			.into_uri()
			.unwrap();

		assert_eq!(
			uri,
			"https://db.scout.ch/oauth/authorize?response_type=code&client_id=app-uid"
		);
	}

	#[tokio::test]
	async fn exchange_with_client_secret_post() {
		let client = test_client();
		let secret = ClientSecret::new("s3cret");
		let code = Code::new("auth-code").unwrap();
		let http_client = StubClient::json(StatusCode::OK, TOKEN_BODY);

		let token = TokenEndpoint::new(&client, "https://db.scout.ch/oauth/token")
			.exchange_code(code, Some("https://app.example.org/callback"))
			.with_client_secret(
				ClientAuthMethod::ClientSecretPost,
				client.client_id(),
				&secret,
			)
			.send(&http_client)
			.await
			.unwrap();

		assert_eq!(token.access_token.as_str(), "at-1");

		let requests = http_client.requests();
		let request = &requests[0];
		assert_eq!(request.method(), http::Method::POST);
		assert_eq!(request.uri(), "https://db.scout.ch/oauth/token");
		assert_eq!(
			request.headers().get(header::CONTENT_TYPE),
			Some(&APPLICATION_X_WWW_FORM_URLENCODED)
		);
		assert!(request.headers().get(header::AUTHORIZATION).is_none());
		assert_eq!(
			std::str::from_utf8(request.body()).unwrap(),
			"grant_type=authorization_code&code=auth-code\
			&redirect_uri=https%3A%2F%2Fapp.example.org%2Fcallback\
			&client_id=app-uid&client_secret=s3cret"
		);
	}

	#[tokio::test]
	async fn exchange_with_client_secret_basic() {
		let client = test_client();
		let secret = ClientSecret::new("s3cret");
		let code = Code::new("auth-code").unwrap();
		let http_client = StubClient::json(StatusCode::OK, TOKEN_BODY);

		TokenEndpoint::new(&client, "https://db.scout.ch/oauth/token")
			.exchange_code(code, None)
			.with_client_secret(
				ClientAuthMethod::ClientSecretBasic,
				client.client_id(),
				&secret,
			)
			.send(&http_client)
			.await
			.unwrap();

		let requests = http_client.requests();
		let request = &requests[0];
		assert_eq!(
			request.headers().get(header::AUTHORIZATION).unwrap(),
			&format!("Basic {}", BASE64_STANDARD.encode("app-uid:s3cret"))
		);
		assert_eq!(
			std::str::from_utf8(request.body()).unwrap(),
			"grant_type=authorization_code&code=auth-code"
		);
	}

	#[tokio::test]
	async fn exchange_rejected_by_server() {
		let client = test_client();
		let secret = ClientSecret::new("s3cret");
		let code = Code::new("expired").unwrap();
		let http_client = StubClient::json(
			StatusCode::BAD_REQUEST,
			r#"{"error":"invalid_grant","error_description":"The provided authorization grant is invalid."}"#,
		);

		let result = TokenEndpoint::new(&client, "https://db.scout.ch/oauth/token")
			.exchange_code(code, None)
			.with_client_secret(ClientAuthMethod::default(), client.client_id(), &secret)
			.send(&http_client)
			.await;

		assert!(matches!(
			result,
			Err(OAuth2ClientError::ErrorResponse(status, _)) if status == StatusCode::BAD_REQUEST
		));
	}
}
