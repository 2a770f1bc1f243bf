use crate::{
	client::OAuth2ClientError,
	endpoints::{Endpoint, RedirectRequest, RequestBuilder},
	util::extend_uri_query,
};

/// Authorization endpoint, where the user-agent is sent to log in.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.1>
pub struct AuthorizationEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a str,
}

impl<'a, C> AuthorizationEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a str) -> Self {
		Self { client, uri }
	}

	pub fn begin<T>(self, request: T) -> RequestBuilder<Self, T> {
		RequestBuilder::new(self, request)
	}
}

impl<'a, C> Clone for AuthorizationEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for AuthorizationEndpoint<'a, C> {}

impl<'a, C> Endpoint for AuthorizationEndpoint<'a, C> {
	type Client = C;

	fn client(&self) -> &Self::Client {
		self.client
	}
}

impl<'a, C, T> RequestBuilder<AuthorizationEndpoint<'a, C>, T>
where
	T: RedirectRequest,
{
	/// Builds the URI the user-agent must be redirected to.
	pub fn into_uri(self) -> Result<String, OAuth2ClientError> {
		extend_uri_query(self.endpoint.uri, &self.request.build_query())
	}
}
