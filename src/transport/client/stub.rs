//! Recording [`HttpClient`] used by unit tests.
use std::sync::Mutex;

use http::{HeaderValue, StatusCode, header};

use crate::client::OAuth2ClientError;

use super::HttpClient;

type Reply = Result<http::Response<Vec<u8>>, OAuth2ClientError>;

/// Answers every request with the same canned reply and keeps a copy of
/// each request it saw.
pub(crate) struct StubClient {
	reply: Box<dyn Fn() -> Reply + Send + Sync>,
	requests: Mutex<Vec<http::Request<Vec<u8>>>>,
}

impl StubClient {
	pub fn new(reply: impl Fn() -> Reply + Send + Sync + 'static) -> Self {
		Self {
			reply: Box::new(reply),
			requests: Mutex::new(Vec::new()),
		}
	}

	pub fn respond(status: StatusCode, content_type: &'static str, body: &'static str) -> Self {
		Self::new(move || {
			Ok(http::Response::builder()
				.status(status)
				.header(header::CONTENT_TYPE, HeaderValue::from_static(content_type))
				.body(body.as_bytes().to_vec())
				.unwrap())
		})
	}

	pub fn json(status: StatusCode, body: &'static str) -> Self {
		Self::respond(status, "application/json; charset=utf-8", body)
	}

	pub fn unreachable() -> Self {
		Self::new(|| Err(OAuth2ClientError::request("connection refused")))
	}

	pub fn requests(&self) -> std::sync::MutexGuard<'_, Vec<http::Request<Vec<u8>>>> {
		self.requests.lock().unwrap()
	}
}

impl HttpClient for StubClient {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		self.requests.lock().unwrap().push(request);
		(self.reply)()
	}
}
