//! [Hitobito](https://hitobito.com) OAuth 2.0 provider.
//!
//! Hitobito runs Doorkeeper: the usual authorization and token endpoints
//! live under `/oauth`, next to a profile endpoint that returns the person
//! owning the access token. The `with_roles` scope adds the person's group
//! roles to the profile.
use http::{HeaderName, HeaderValue, StatusCode, header};

use crate::{
	ClientIdBuf, ScopeTokenBuf,
	client::{BasicClient, OAuthEndpoint},
	config::HitobitoConfig,
	scope_token,
	transport::{APPLICATION_JSON, HttpClient},
};

use super::{ConfigError, ExchangeError, FetchError, LoginUrlError, NotSetUp, Provider, User};

/// Name the broker routes Hitobito logins with.
pub const NAME: &str = "hitobito-oauth";

pub const AUTHORIZE_PATH: &str = "/oauth/authorize";
pub const TOKEN_PATH: &str = "/oauth/token";
pub const PROFILE_PATH: &str = "/oauth/profile";

/// Scope requested at login and on the profile endpoint.
pub const SCOPE_WITH_ROLES: &str = "with_roles";

/// Header selecting which profile scope the profile endpoint answers with.
pub const X_SCOPE: HeaderName = HeaderName::from_static("x-scope");

/// Hitobito provider.
///
/// All network calls go through the injected `H`, which is reused for the
/// lifetime of the provider.
pub struct Hitobito<H> {
	config: HitobitoConfig,
	http_client: H,
	oauth: Option<BasicClient>,
}

#[cfg(feature = "reqwest")]
impl Hitobito<reqwest::Client> {
	/// Creates a provider using a default [`reqwest::Client`].
	pub fn new(config: HitobitoConfig) -> Self {
		Self::with_http_client(config, reqwest::Client::new())
	}
}

impl<H> Hitobito<H> {
	pub fn with_http_client(config: HitobitoConfig, http_client: H) -> Self {
		Self {
			config,
			http_client,
			oauth: None,
		}
	}

	pub fn config(&self) -> &HitobitoConfig {
		&self.config
	}

	/// Endpoints derived by [`Provider::setup`].
	pub fn endpoint(&self) -> Option<&OAuthEndpoint> {
		self.oauth.as_ref().map(BasicClient::endpoint)
	}

	fn oauth(&self) -> Result<&BasicClient, NotSetUp> {
		self.oauth.as_ref().ok_or(NotSetUp(NAME))
	}
}

/// Endpoints of the Hitobito instance at `domain`.
pub fn endpoint_for(domain: &str) -> OAuthEndpoint {
	let with_roles: ScopeTokenBuf = scope_token!("with_roles").to_owned();

	OAuthEndpoint::new(
		format!("{domain}{AUTHORIZE_PATH}"),
		format!("{domain}{TOKEN_PATH}"),
		[with_roles],
	)
}

impl<H: HttpClient> Provider for Hitobito<H> {
	fn name(&self) -> &'static str {
		NAME
	}

	fn setup(&mut self) -> Result<(), ConfigError> {
		let missing = self.config.missing();
		if !missing.is_empty() {
			return Err(ConfigError::Missing(missing));
		}

		let client_id = ClientIdBuf::new_opaque(self.config.client_id.clone());

		let endpoint = endpoint_for(&self.config.domain);
		log::debug!(
			"{NAME}: authorize at {}, token at {}",
			endpoint.auth_url,
			endpoint.token_url
		);

		self.oauth = Some(
			BasicClient::new(client_id, self.config.client_secret.clone(), endpoint)
				.with_auth_method(self.config.auth_method),
		);

		Ok(())
	}

	fn login_url(&self, redirect_uri: &str, state: &str) -> Result<String, LoginUrlError> {
		self.oauth()?
			.login_url(redirect_uri, state)
			.map_err(LoginUrlError::Encode)
	}

	async fn exchange_code(&self, redirect_uri: &str, code: &str) -> Result<String, ExchangeError> {
		let token = self
			.oauth()?
			.exchange_code(&self.http_client, redirect_uri, code)
			.await?;

		Ok(token.access_token.as_str().to_owned())
	}

	async fn get_user(&self, token: &str) -> Result<User, FetchError> {
		self.oauth()?;

		let request = profile_request(&self.config.domain, token)?;
		let response = self
			.http_client
			.send(request)
			.await
			.map_err(FetchError::Transport)?;

		decode_profile(response)
	}
}

/// `GET {domain}/oauth/profile` authenticated with `token`.
fn profile_request(domain: &str, token: &str) -> Result<http::Request<Vec<u8>>, FetchError> {
	let uri: http::Uri = format!("{domain}{PROFILE_PATH}")
		.parse()
		.map_err(FetchError::request_construction)?;

	if uri.scheme().is_none() || uri.authority().is_none() {
		return Err(FetchError::request_construction(format!(
			"profile URL `{uri}` is not absolute"
		)));
	}

	let mut authorization = HeaderValue::try_from(format!("Bearer {token}"))
		.map_err(FetchError::request_construction)?;
	authorization.set_sensitive(true);

	http::Request::builder()
		.method(http::Method::GET)
		.uri(uri)
		.header(header::AUTHORIZATION, authorization)
		.header(X_SCOPE, HeaderValue::from_static(SCOPE_WITH_ROLES))
		.header(header::ACCEPT, APPLICATION_JSON)
		.body(Vec::new())
		.map_err(FetchError::request_construction)
}

/// Decodes a profile response, consuming it.
///
/// The body is dropped when this returns, whichever way it returns.
fn decode_profile<B>(response: http::Response<B>) -> Result<User, FetchError>
where
	B: AsRef<[u8]>,
{
	let (parts, body) = response.into_parts();

	let status = parts.status;
	if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
		log::debug!("{NAME}: profile request rejected ({status})");
		return Err(FetchError::Unauthorized(status));
	}

	if !status.is_success() {
		log::error!("{NAME}: unexpected profile response status: {status}");
		return Err(FetchError::Status(status));
	}

	log::trace!(
		"{NAME}: profile response body: {}",
		String::from_utf8_lossy(body.as_ref())
	);

	serde_json::from_slice(body.as_ref()).map_err(FetchError::Decode)
}
