//! In-memory transport shared by the integration tests.

#![allow(dead_code)]

// std
use std::{collections::VecDeque, error::Error as StdError, fmt, sync::Arc};
// crates.io
use parking_lot::Mutex;
// self
use kr_oauth::{
	error::TransportError,
	http::{self, Headers, HttpTransport, Method, TransportFuture},
	url::Url,
};

/// Request captured by [`ScriptedTransport`].
#[derive(Clone, Debug)]
pub struct Recorded {
	pub method: Method,
	pub uri: Url,
	pub headers: Headers,
	pub body: Option<String>,
}
impl Recorded {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).map(String::as_str)
	}

	pub fn query_pairs(&self) -> Vec<(String, String)> {
		self.uri.query_pairs().into_owned().collect()
	}

	pub fn form_pairs(&self) -> Vec<(String, String)> {
		let body = self.body.as_deref().unwrap_or_default();

		url::form_urlencoded::parse(body.as_bytes()).into_owned().collect()
	}
}

/// Scripted answer for the next call.
#[derive(Clone, Debug)]
pub enum Reply {
	Status(u16, String),
	NetworkDown,
	Cancelled,
}
impl Reply {
	pub fn ok(body: &str) -> Self {
		Self::Status(200, body.into())
	}

	pub fn status(status: u16, body: &str) -> Self {
		Self::Status(status, body.into())
	}
}

#[derive(Debug)]
pub struct FakeFailure(&'static str);
impl fmt::Display for FakeFailure {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.0)
	}
}
impl StdError for FakeFailure {}

/// Transport answering from a FIFO script and recording every call.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
	replies: Mutex<VecDeque<Reply>>,
	recorded: Mutex<Vec<Recorded>>,
}
impl ScriptedTransport {
	pub fn new(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
		Arc::new(Self {
			replies: Mutex::new(replies.into_iter().collect()),
			recorded: Mutex::new(Vec::new()),
		})
	}

	pub fn requests(&self) -> Vec<Recorded> {
		self.recorded.lock().clone()
	}

	pub fn only_request(&self) -> Recorded {
		let recorded = self.requests();

		assert_eq!(recorded.len(), 1, "Exactly one request should have been dispatched.");

		recorded.into_iter().next().expect("One request was asserted above.")
	}

	fn answer(&self, recorded: Recorded) -> Result<String, TransportError> {
		self.recorded.lock().push(recorded);

		let reply =
			self.replies.lock().pop_front().expect("Scripted transport ran out of replies.");

		match reply {
			Reply::Status(status, body) => http::settle(status, body),
			Reply::NetworkDown => Err(TransportError::network(FakeFailure("connection refused"))),
			Reply::Cancelled => Err(TransportError::cancelled(FakeFailure("cancelled"))),
		}
	}
}
impl HttpTransport for ScriptedTransport {
	fn get<'a>(&'a self, uri: &'a Url, headers: &'a Headers) -> TransportFuture<'a> {
		let recorded =
			Recorded { method: Method::Get, uri: uri.clone(), headers: headers.clone(), body: None };

		Box::pin(async move { self.answer(recorded) })
	}

	fn post<'a>(&'a self, uri: &'a Url, headers: &'a Headers, body: String) -> TransportFuture<'a> {
		let recorded = Recorded {
			method: Method::Post,
			uri: uri.clone(),
			headers: headers.clone(),
			body: Some(body),
		};

		Box::pin(async move { self.answer(recorded) })
	}
}

pub fn pair(name: &str, value: &str) -> (String, String) {
	(name.to_owned(), value.to_owned())
}
