//! OAuth 2.0 client trait, error type and the generic authorization-code
//! client.
use crate::{ClientId, server::ErrorResponse};

mod basic;

pub use basic::*;

pub trait OAuth2Client {
	fn client_id(&self) -> &ClientId;
}

#[derive(Debug, thiserror::Error)]
pub enum OAuth2ClientError {
	#[error("unable to send request: {0}")]
	Request(String),

	#[error("unable to receive response: {0}")]
	Response(String),

	#[error("server responded with status code: {0}")]
	ServerError(http::StatusCode),

	#[error("server responded with status code {0}: {1}")]
	ErrorResponse(http::StatusCode, ErrorResponse),
}

impl OAuth2ClientError {
	pub fn request(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("request error: {msg}");
		Self::Request(msg)
	}

	pub fn response(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("response error: {msg}");
		Self::Response(msg)
	}

	pub fn server(status: http::StatusCode) -> Self {
		log::error!("unexpected server response status: {status}");
		Self::ServerError(status)
	}

	pub fn error_response(status: http::StatusCode, response: ErrorResponse) -> Self {
		log::error!("server rejected request ({status}): {response}");
		Self::ErrorResponse(status, response)
	}
}
