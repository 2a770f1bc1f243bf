//! Identity providers, as seen by an authentication broker.
//!
//! Every provider exposes the same capability set ([`Provider`]) so a
//! broker can route a login to any of them by [`Provider::name`].
use crate::{client::OAuth2ClientError, config::Setting};

pub mod hitobito;
mod user;

pub use hitobito::Hitobito;
pub use user::*;

pub trait Provider {
	/// Identifier the broker routes requests with.
	fn name(&self) -> &'static str;

	/// Validates the configuration and prepares the provider for use.
	///
	/// Calling it again rebuilds the same state.
	fn setup(&mut self) -> Result<(), ConfigError>;

	/// URL the user-agent is redirected to in order to log in.
	///
	/// `state` is handed back unchanged on the redirect to `redirect_uri`.
	fn login_url(&self, redirect_uri: &str, state: &str) -> Result<String, LoginUrlError>;

	/// Exchanges an authorization code for an access token.
	#[allow(async_fn_in_trait)]
	async fn exchange_code(&self, redirect_uri: &str, code: &str) -> Result<String, ExchangeError>;

	/// Fetches the profile of the user owning `token`.
	#[allow(async_fn_in_trait)]
	async fn get_user(&self, token: &str) -> Result<User, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("{} must be set (missing: {})", describe_all(&crate::config::REQUIRED_SETTINGS), describe_all(.0))]
	Missing(Vec<Setting>),
}

fn describe_all(settings: &[Setting]) -> String {
	settings
		.iter()
		.map(|s| format!("{} ({})", s.flag, s.env))
		.collect::<Vec<_>>()
		.join(", ")
}

/// The provider was used before [`Provider::setup`] succeeded.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("provider `{0}` is not set up")]
pub struct NotSetUp(pub &'static str);

#[derive(Debug, thiserror::Error)]
pub enum LoginUrlError {
	#[error(transparent)]
	NotSetUp(#[from] NotSetUp),

	#[error("unable to build login URL: {0}")]
	Encode(#[source] OAuth2ClientError),
}

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
	#[error(transparent)]
	NotSetUp(#[from] NotSetUp),

	#[error("code exchange failed: {0}")]
	Client(#[from] OAuth2ClientError),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	#[error(transparent)]
	NotSetUp(#[from] NotSetUp),

	#[error("unable to build profile request: {0}")]
	RequestConstruction(String),

	#[error("profile request failed: {0}")]
	Transport(#[source] OAuth2ClientError),

	#[error("access token rejected by profile endpoint ({0})")]
	Unauthorized(http::StatusCode),

	#[error("profile endpoint responded with status code: {0}")]
	Status(http::StatusCode),

	#[error("unable to decode user profile: {0}")]
	Decode(#[source] serde_json::Error),
}

impl FetchError {
	pub fn request_construction(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("profile request error: {msg}");
		Self::RequestConstruction(msg)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{CLIENT_SECRET, DOMAIN};

	#[test]
	fn missing_settings_message_names_every_key() {
		let msg = ConfigError::Missing(vec![DOMAIN, CLIENT_SECRET]).to_string();

		assert!(msg.starts_with(
			"providers.hitobito.domain (HITOBITO_DOMAIN), \
			providers.hitobito.client-id (HITOBITO_CLIENT_ID), \
			providers.hitobito.client-secret (HITOBITO_CLIENT_SECRET) must be set"
		));
		assert!(msg.ends_with(
			"(missing: providers.hitobito.domain (HITOBITO_DOMAIN), \
			providers.hitobito.client-secret (HITOBITO_CLIENT_SECRET))"
		));
	}
}
