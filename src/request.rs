//! Provider-agnostic request pipeline.
//!
//! A [`Request`] is produced by a [`RequestBuilder`] once validation passes and is
//! consumed by [`Request::execute`], which:
//!
//! 1. form-encodes the parameters,
//! 2. dispatches them through the shared [`HttpTransport`] (query string for `GET`, body
//!    for `POST`),
//! 3. lets the endpoint's [`ResponseStrategy`] reject failures reported inside successful
//!    bodies,
//! 4. normalizes every provider failure through the strategy's error extractor,
//! 5. decodes the body into `R`.

mod builder;
mod encoding;

pub use builder::*;
pub use encoding::*;

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	error::ParsingError,
	http::{Headers, HttpTransport, Method},
	obs::{self, RequestOutcome, RequestSpan},
	provider::ResponseStrategy,
};

/// Static description of a provider endpoint.
#[derive(Clone, Debug)]
pub struct Endpoint {
	/// Stable label used in spans, metrics, and validation messages.
	pub label: &'static str,
	/// HTTP method.
	pub method: Method,
	/// Absolute endpoint URI.
	pub uri: Cow<'static, str>,
	/// Error vocabulary of the service behind this endpoint.
	pub strategy: &'static dyn ResponseStrategy,
}
impl Endpoint {
	/// Creates an endpoint pointing at a static URI.
	pub const fn new(
		label: &'static str,
		method: Method,
		uri: &'static str,
		strategy: &'static dyn ResponseStrategy,
	) -> Self {
		Self { label, method, uri: Cow::Borrowed(uri), strategy }
	}

	/// Points the endpoint at another URI (e.g. a mock server), keeping everything else.
	///
	/// The URI is stored verbatim and normalized by [`url::Url`] when a request is built, so
	/// `https://API.example.com` is dispatched as `https://api.example.com/`.
	pub fn with_uri(mut self, uri: impl Into<Cow<'static, str>>) -> Self {
		self.uri = uri.into();

		self
	}
}

/// Validated, immutable request ready for execution.
pub struct Request<R> {
	pub(crate) transport: Arc<dyn HttpTransport>,
	pub(crate) label: &'static str,
	pub(crate) method: Method,
	pub(crate) uri: Url,
	pub(crate) strategy: &'static dyn ResponseStrategy,
	pub(crate) headers: Headers,
	pub(crate) params: BTreeMap<String, String>,
	pub(crate) _response: PhantomData<fn() -> R>,
}
impl<R> Request<R> {
	/// Endpoint label.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// HTTP method.
	pub fn method(&self) -> Method {
		self.method
	}

	/// Normalized endpoint URI, before parameters are attached.
	pub fn uri(&self) -> &Url {
		&self.uri
	}

	/// Frozen headers.
	pub fn headers(&self) -> &Headers {
		&self.headers
	}

	/// Frozen parameters.
	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}
}
impl<R> Request<R>
where
	R: DeserializeOwned,
{
	/// Sends the request and decodes the provider's answer into `R`.
	///
	/// Suspends the calling task until the transport resolves. Failures surface as:
	///
	/// - [`Error::Network`] / [`Error::Cancelled`] straight from the transport,
	/// - [`Error::Response`] with the extracted provider code for non-success statuses and
	///   for failures reported inside a successful body,
	/// - [`Error::Parsing`] when a successful body does not match `R`.
	pub async fn execute(self) -> Result<R> {
		let label = self.label;
		let span = RequestSpan::new(label, self.method);

		obs::record_request_outcome(label, RequestOutcome::Attempt);

		let result = span.instrument(self.run()).await;

		match &result {
			Ok(_) => obs::record_request_outcome(label, RequestOutcome::Success),
			Err(_e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(endpoint = label, kind = _e.kind(), error = %_e, "Request failed.");

				obs::record_request_outcome(label, RequestOutcome::Failure);
			},
		}

		result
	}

	async fn run(self) -> Result<R> {
		let strategy = self.strategy;
		let body = self.dispatch().await.and_then(|body| {
			strategy.validate_success(&body)?;

			Ok(body)
		});
		let body = body.map_err(|e| match e {
			Error::Response(response) => {
				let detail = strategy.parse_error(&response.raw_body);

				Error::Response(response.with_detail(detail))
			},
			other => other,
		})?;

		decode::<R>(&body)
	}

	async fn dispatch(&self) -> Result<String> {
		let encoded = encode_params(&self.params);
		let outcome = match self.method {
			Method::Get => {
				let uri = dispatch_uri(&self.uri, &encoded);

				self.transport.get(&uri, &self.headers).await
			},
			Method::Post => self.transport.post(&self.uri, &self.headers, encoded).await,
		};

		Ok(outcome?)
	}
}
impl<R> Debug for Request<R> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Request")
			.field("label", &self.label)
			.field("method", &self.method)
			.field("uri", &self.uri.as_str())
			.field("headers", &self.headers.keys().collect::<Vec<_>>())
			.field("params", &self.params.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

/// Decodes a JSON body into `R`, rejecting trailing content.
pub fn decode<R>(body: &str) -> Result<R>
where
	R: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_str(body);
	let value = serde_path_to_error::deserialize(&mut de)
		.map_err(|e| ParsingError::new::<R>(e.path().to_string(), e.into_inner()))?;

	de.end().map_err(|e| ParsingError::new::<R>(".", e))?;

	Ok(value)
}
