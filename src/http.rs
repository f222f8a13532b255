//! Transport primitives consumed by the request pipeline.
//!
//! The pipeline only needs two capabilities from an HTTP stack: `GET` with headers and
//! `POST` with headers plus a form body, each resolving to the response body or a
//! [`TransportError`]. [`HttpTransport`] captures exactly that so downstream crates can
//! plug in their own client, and [`ReqwestTransport`] provides the default implementation.
//! Every implementation must route the final status through [`settle`] so the accepted
//! status range stays identical across transports.

// std
use std::{
	ops::{Deref, RangeInclusive},
	sync::atomic::{AtomicBool, Ordering},
	time::Duration,
};
// crates.io
use tokio::sync::Notify;
// self
use crate::{_prelude::*, error::TransportError};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Header mapping passed to transports. Keys are case-sensitive; later writes win.
pub type Headers = BTreeMap<String, String>;

/// Boxed future returned by [`HttpTransport`] calls.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<String, TransportError>> + 'a + Send>>;

/// Status codes treated as transport-level success.
///
/// The upper bound is inclusive, so `300` counts as success.
pub const SUCCESS_STATUS: RangeInclusive<u16> = 200..=300;

/// HTTP methods used by provider endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// Parameters travel in the query string.
	Get,
	/// Parameters travel as a form-encoded body.
	Post,
}
impl Method {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Minimal HTTP capability required by the request pipeline.
///
/// Implementations are shared as `Arc<dyn HttpTransport>` between clients, builders, and
/// requests, so they must be `Send + Sync + 'static` and safe to call concurrently. They
/// own timeouts and redirect handling, and report failures as [`TransportError`]:
///
/// - [`TransportError::Network`] when the exchange cannot complete (including timeouts).
/// - [`TransportError::Cancelled`] when a caller-controlled signal aborts the call.
/// - [`TransportError::Status`] when the server answers outside [`SUCCESS_STATUS`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Issues a `GET` to `uri` with the provided headers.
	fn get<'a>(&'a self, uri: &'a Url, headers: &'a Headers) -> TransportFuture<'a>;

	/// Issues a `POST` to `uri` with the provided headers and body.
	fn post<'a>(&'a self, uri: &'a Url, headers: &'a Headers, body: String)
	-> TransportFuture<'a>;
}

/// Classifies a completed HTTP exchange.
pub fn settle(status: u16, body: String) -> Result<String, TransportError> {
	if SUCCESS_STATUS.contains(&status) {
		Ok(body)
	} else {
		Err(TransportError::Status { status, body })
	}
}

/// Cause attached to [`TransportError::Cancelled`].
#[derive(Clone, Copy, Debug, ThisError)]
#[error("Cancellation was requested before the OAuth server responded.")]
pub struct CancelledByCaller;

/// Cloneable cancellation signal shared between a caller and its in-flight requests.
///
/// Once [`cancel`](Cancellation::cancel) is called the signal stays fired, so requests
/// started afterwards resolve to a cancellation immediately.
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<CancellationState>);
impl Cancellation {
	/// Creates an unfired signal.
	pub fn new() -> Self {
		Self::default()
	}

	/// Fires the signal and wakes every waiting request.
	pub fn cancel(&self) {
		self.0.fired.store(true, Ordering::SeqCst);
		self.0.notify.notify_waiters();
	}

	/// Returns true once the signal has fired.
	pub fn is_cancelled(&self) -> bool {
		self.0.fired.load(Ordering::SeqCst)
	}

	/// Resolves once the signal has fired.
	pub async fn cancelled(&self) {
		loop {
			// Register before checking the flag so a concurrent `cancel` is not missed.
			let notified = self.0.notify.notified();

			if self.is_cancelled() {
				return;
			}

			notified.await;
		}
	}

	/// Runs `call` unless the signal fires first.
	pub async fn guard<F>(&self, call: F) -> Result<String, TransportError>
	where
		F: Future<Output = Result<String, TransportError>>,
	{
		tokio::select! {
			biased;
			_ = self.cancelled() => Err(TransportError::cancelled(CancelledByCaller)),
			outcome = call => outcome,
		}
	}
}

#[derive(Debug, Default)]
struct CancellationState {
	fired: AtomicBool,
	notify: Notify,
}

/// Timeouts and redirect budget applied by [`ReqwestTransport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportConfig {
	/// Deadline for establishing a connection.
	pub connect_timeout: Duration,
	/// Deadline for the whole request, including reading the body.
	pub request_timeout: Duration,
	/// Maximum number of redirects followed per request.
	pub max_redirects: usize,
}
impl TransportConfig {
	const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
	const DEFAULT_MAX_REDIRECTS: usize = 10;

	/// Overrides the connect timeout.
	pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = timeout;

		self
	}

	/// Overrides the request timeout.
	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;

		self
	}

	/// Overrides the redirect budget.
	pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
		self.max_redirects = max_redirects;

		self
	}
}
impl Default for TransportConfig {
	fn default() -> Self {
		Self {
			connect_timeout: Self::DEFAULT_TIMEOUT,
			request_timeout: Self::DEFAULT_TIMEOUT,
			max_redirects: Self::DEFAULT_MAX_REDIRECTS,
		}
	}
}

/// Default [`HttpTransport`] backed by a shared [`ReqwestClient`].
///
/// Clones share the underlying connection pool. Attach a [`Cancellation`] with
/// [`ReqwestTransport::with_cancellation`] to make calls abortable.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ReqwestClient,
	cancellation: Option<Cancellation>,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport with the default [`TransportConfig`].
	pub fn new() -> Result<Self, ConfigError> {
		Self::from_config(&TransportConfig::default())
	}

	/// Builds a transport honoring the provided timeouts and redirect budget.
	pub fn from_config(config: &TransportConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder()
			.connect_timeout(config.connect_timeout)
			.timeout(config.request_timeout)
			.redirect(reqwest::redirect::Policy::limited(config.max_redirects))
			.build()?;

		Ok(Self::with_client(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, cancellation: None }
	}

	/// Returns a handle sharing this client whose calls abort when `cancellation` fires.
	pub fn with_cancellation(&self, cancellation: Cancellation) -> Self {
		Self { client: self.client.clone(), cancellation: Some(cancellation) }
	}

	async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, TransportError> {
		let call = async {
			let response = request.send().await?;
			let status = response.status().as_u16();
			let body = response.text().await?;

			settle(status, body)
		};

		match &self.cancellation {
			Some(cancellation) => cancellation.guard(call).await,
			None => call.await,
		}
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn get<'a>(&'a self, uri: &'a Url, headers: &'a Headers) -> TransportFuture<'a> {
		Box::pin(async move {
			let request = apply_headers(self.client.get(uri.as_str()), headers);

			self.send(request).await
		})
	}

	fn post<'a>(
		&'a self,
		uri: &'a Url,
		headers: &'a Headers,
		body: String,
	) -> TransportFuture<'a> {
		Box::pin(async move {
			let request = apply_headers(self.client.post(uri.as_str()), headers).body(body);

			self.send(request).await
		})
	}
}

#[cfg(feature = "reqwest")]
fn apply_headers(mut request: reqwest::RequestBuilder, headers: &Headers) -> reqwest::RequestBuilder {
	for (name, value) in headers {
		request = request.header(name.as_str(), value.as_str());
	}

	request
}

/// Transport that fails the test if anything is dispatched through it.
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct Offline;
#[cfg(test)]
impl HttpTransport for Offline {
	fn get<'a>(&'a self, uri: &'a Url, _headers: &'a Headers) -> TransportFuture<'a> {
		panic!("Unexpected GET {uri} in an offline test.")
	}

	fn post<'a>(&'a self, uri: &'a Url, _headers: &'a Headers, _body: String) -> TransportFuture<'a> {
		panic!("Unexpected POST {uri} in an offline test.")
	}
}
