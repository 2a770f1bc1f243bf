use std::collections::BTreeSet;

use crate::{
	ClientId, ClientIdBuf, ClientSecret, Code, IntoScope, ScopeBuf, ScopeTokenBuf,
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::{
		AddState,
		authorization::AuthorizationEndpoint,
		token::{TokenEndpoint, TokenResponse},
	},
	grant::authorization_code::{AddClientSecret, ClientAuthMethod},
	transport::HttpClient,
};

/// Authorization and token endpoint of an authorization server, with the
/// scopes requested at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthEndpoint {
	pub auth_url: String,
	pub token_url: String,
	pub scopes: BTreeSet<ScopeTokenBuf>,
}

impl OAuthEndpoint {
	pub fn new(
		auth_url: impl Into<String>,
		token_url: impl Into<String>,
		scopes: impl IntoIterator<Item = ScopeTokenBuf>,
	) -> Self {
		Self {
			auth_url: auth_url.into(),
			token_url: token_url.into(),
			scopes: scopes.into_iter().collect(),
		}
	}
}

/// Confidential client running the authorization code flow against a
/// single [`OAuthEndpoint`].
#[derive(Debug, Clone)]
pub struct BasicClient {
	client_id: ClientIdBuf,
	client_secret: ClientSecret,
	endpoint: OAuthEndpoint,
	scope: Option<ScopeBuf>,
	auth_method: ClientAuthMethod,
}

impl BasicClient {
	pub fn new(client_id: ClientIdBuf, client_secret: ClientSecret, endpoint: OAuthEndpoint) -> Self {
		let scope = (&endpoint.scopes).into_scope();
		Self {
			client_id,
			client_secret,
			endpoint,
			scope,
			auth_method: ClientAuthMethod::default(),
		}
	}

	pub fn with_auth_method(self, auth_method: ClientAuthMethod) -> Self {
		Self {
			auth_method,
			..self
		}
	}

	pub fn endpoint(&self) -> &OAuthEndpoint {
		&self.endpoint
	}

	pub fn auth_method(&self) -> ClientAuthMethod {
		self.auth_method
	}

	pub fn authorization_endpoint(&self) -> AuthorizationEndpoint<'_, Self> {
		AuthorizationEndpoint::new(self, &self.endpoint.auth_url)
	}

	pub fn token_endpoint(&self) -> TokenEndpoint<'_, Self> {
		TokenEndpoint::new(self, &self.endpoint.token_url)
	}

	/// URL of the authorization endpoint the user-agent is sent to.
	///
	/// An empty `redirect_uri` is left out, letting the server use the one
	/// registered for the client. `state` is passed through untouched.
	pub fn login_url(&self, redirect_uri: &str, state: &str) -> Result<String, OAuth2ClientError> {
		self.authorization_endpoint()
			.authorize_code(non_empty(redirect_uri), self.scope.as_deref())
			.with_state(Some(state.to_owned()))
			.into_uri()
	}

	/// Exchanges an authorization code at the token endpoint.
	pub async fn exchange_code(
		&self,
		http_client: &impl HttpClient,
		redirect_uri: &str,
		code: &str,
	) -> Result<TokenResponse, OAuth2ClientError> {
		let code = Code::new(code)
			.map_err(|_| OAuth2ClientError::request("invalid authorization code"))?;

		log::debug!("exchanging authorization code at {}", self.endpoint.token_url);

		self.token_endpoint()
			.exchange_code(code, non_empty(redirect_uri))
			.with_client_secret(self.auth_method, self.client_id(), &self.client_secret)
			.send(http_client)
			.await
	}
}

impl OAuth2Client for BasicClient {
	fn client_id(&self) -> &ClientId {
		self.client_id.as_client_id()
	}
}

fn non_empty(value: &str) -> Option<&str> {
	(!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
	use http::StatusCode;

	use crate::{scope_token, transport::stub::StubClient};

	use super::*;

	fn test_client() -> BasicClient {
		BasicClient::new(
			ClientIdBuf::new("app-uid".to_owned()).unwrap(),
			ClientSecret::new("s3cret"),
			OAuthEndpoint::new(
				"https://db.scout.ch/oauth/authorize",
				"https://db.scout.ch/oauth/token",
				[scope_token!("with_roles").to_owned()],
			),
		)
	}

	#[test]
	fn login_url_with_state() {
		let url = test_client()
			.login_url("https://app.example.org/_oauth", "nonce:https://app.example.org/")
			.unwrap();

		assert_eq!(
			url,
			"https://db.scout.ch/oauth/authorize?response_type=code&client_id=app-uid\
			&redirect_uri=https%3A%2F%2Fapp.example.org%2F_oauth&scope=with_roles\
			&state=nonce%3Ahttps%3A%2F%2Fapp.example.org%2F"
		);
	}

	#[test]
	fn login_url_without_redirect_uri() {
		let url = test_client().login_url("", "s").unwrap();
		assert!(!url.contains("redirect_uri"));
		assert!(url.ends_with("&state=s"));
	}

	#[tokio::test]
	async fn exchange_returns_full_token_response() {
		let http_client = StubClient::json(
			StatusCode::OK,
			r#"{"access_token":"at-1","token_type":"Bearer","expires_in":7200,"refresh_token":"rt-1"}"#,
		);

		let token = test_client()
			.exchange_code(&http_client, "https://app.example.org/_oauth", "code-1")
			.await
			.unwrap();

		assert_eq!(token.access_token.as_str(), "at-1");
		assert_eq!(token.refresh_token.as_deref(), Some("rt-1"));
		assert_eq!(http_client.requests().len(), 1);
	}

	#[tokio::test]
	async fn invalid_code_is_not_sent() {
		let http_client = StubClient::unreachable();

		let result = test_client().exchange_code(&http_client, "", "").await;

		assert!(matches!(result, Err(OAuth2ClientError::Request(_))));
		assert!(http_client.requests().is_empty());
	}

	#[tokio::test]
	async fn code_outside_grammar_is_not_sent() {
		let http_client = StubClient::unreachable();

		for code in ["c\u{f6}de", "co de\n", "\x7f"] {
			let result = test_client().exchange_code(&http_client, "", code).await;
			assert!(matches!(result, Err(OAuth2ClientError::Request(_))));
		}

		assert!(http_client.requests().is_empty());
	}

	#[tokio::test]
	async fn basic_auth_method_is_used() {
		let http_client = StubClient::json(
			StatusCode::OK,
			r#"{"access_token":"at-1","token_type":"Bearer"}"#,
		);

		test_client()
			.with_auth_method(ClientAuthMethod::ClientSecretBasic)
			.exchange_code(&http_client, "", "code-1")
			.await
			.unwrap();

		let requests = http_client.requests();
		assert!(requests[0].headers().contains_key(http::header::AUTHORIZATION));
	}
}
