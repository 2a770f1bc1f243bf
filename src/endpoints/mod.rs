//! Endpoint abstractions.
//!
//! A request is started from an endpoint (`begin`) which yields a
//! [`RequestBuilder`]. Extension wrappers such as [`Stateful`] are layered
//! on top with `map`, then the request is either turned into a redirect URI
//! ([`RedirectRequest`]) or sent over an [`HttpClient`] ([`HttpRequest`]).
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
	client::OAuth2ClientError,
	transport::{ContentType, HttpClient, encode_request},
};

pub mod authorization;
pub mod token;

pub trait Endpoint {
	type Client;

	fn client(&self) -> &Self::Client;
}

/// A request bound to the endpoint it will be sent to.
pub struct RequestBuilder<E, T> {
	pub endpoint: E,
	pub request: T,
}

impl<E, T> RequestBuilder<E, T> {
	pub fn new(endpoint: E, request: T) -> Self {
		Self { endpoint, request }
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RequestBuilder<E, U> {
		RequestBuilder {
			endpoint: self.endpoint,
			request: f(self.request),
		}
	}

	pub async fn send(self, http_client: &impl HttpClient) -> Result<T::Response, OAuth2ClientError>
	where
		T: HttpRequest<E>,
	{
		self.request.send(&self.endpoint, http_client).await
	}
}

/// Request delivered to the authorization server through the user-agent, as
/// query parameters of a redirect URI.
pub trait RedirectRequest {
	type RequestBody<'b>: Serialize
	where
		Self: 'b;

	fn build_query(&self) -> Self::RequestBody<'_>;
}

/// Request sent directly to an endpoint over HTTP.
pub trait HttpRequest<E> {
	type ContentType: ContentType;

	type RequestBody<'b>: Serialize
	where
		Self: 'b;

	type ResponsePayload;

	type Response;

	#[allow(async_fn_in_trait)]
	async fn build_request(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
	) -> Result<http::Request<Self::RequestBody<'_>>, OAuth2ClientError>;

	fn decode_response(
		&self,
		endpoint: &E,
		response: http::Response<Vec<u8>>,
	) -> Result<http::Response<Self::ResponsePayload>, OAuth2ClientError>;

	#[allow(async_fn_in_trait)]
	async fn process_response(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
		response: http::Response<Self::ResponsePayload>,
	) -> Result<Self::Response, OAuth2ClientError>;

	#[allow(async_fn_in_trait)]
	async fn send(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
	) -> Result<Self::Response, OAuth2ClientError> {
		let request = self.build_request(endpoint, http_client).await?;
		let request = encode_request::<Self::ContentType, _>(request)?;
		let response = http_client.send(request).await?;
		let decoded_response = self.decode_response(endpoint, response)?;
		self.process_response(endpoint, http_client, decoded_response)
			.await
	}
}

/// Wrapper that attaches an optional `state` parameter to a redirect
/// request.
#[skip_serializing_none]
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Stateful<T> {
	#[serde(flatten)]
	pub value: T,

	/// Opaque value used by the client to maintain state between the request
	/// and callback.
	///
	/// The authorization server includes this value when redirecting the
	/// user-agent back to the client. The parameter *should* be used for
	/// preventing cross-site request forgery.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
	pub state: Option<String>,
}

impl<T> Stateful<T> {
	pub fn new(value: T, state: Option<String>) -> Self {
		Self { value, state }
	}
}

impl<T> RedirectRequest for Stateful<T>
where
	T: RedirectRequest,
{
	type RequestBody<'b>
		= Stateful<T::RequestBody<'b>>
	where
		Self: 'b;

	fn build_query(&self) -> Self::RequestBody<'_> {
		Stateful::new(self.value.build_query(), self.state.clone())
	}
}

/// Extension trait for attaching an optional state parameter to a
/// [`RequestBuilder`].
pub trait AddState {
	type Output;

	fn with_state(self, state: Option<String>) -> Self::Output;
}

impl<E, T> AddState for RequestBuilder<E, T> {
	type Output = RequestBuilder<E, Stateful<T>>;

	fn with_state(self, state: Option<String>) -> Self::Output {
		self.map(|value| Stateful::new(value, state))
	}
}
