//! Error taxonomy shared by builders, transports, and the request pipeline.

// self
use crate::{_prelude::*, provider::ErrorDetail};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed cause carried by transport-level failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure surfaced by [`Request::execute`](crate::request::Request::execute).
///
/// The four variants are the only outcomes a caller has to handle; builder misuse is
/// reported separately through [`ValidationError`].
#[derive(Debug, ThisError)]
pub enum Error {
	/// The transport could not complete the exchange (DNS, connect, TLS, timeout).
	#[error("Failed to reach the OAuth server.")]
	Network {
		/// Transport-specific cause.
		#[source]
		source: BoxError,
	},
	/// The call was cancelled while waiting on the transport.
	#[error("Request to the OAuth server was cancelled.")]
	Cancelled {
		/// Cancellation cause reported by the transport.
		#[source]
		source: BoxError,
	},
	/// A nominally successful body did not match the expected response shape.
	#[error(transparent)]
	Parsing(#[from] ParsingError),
	/// The provider reported a failure, either via HTTP status or inside the body.
	#[error(transparent)]
	Response(#[from] ResponseError),
}
impl Error {
	/// Returns the provider failure, if this is one.
	pub fn as_response(&self) -> Option<&ResponseError> {
		match self {
			Self::Response(inner) => Some(inner),
			_ => None,
		}
	}

	/// Returns a stable label for the failure kind.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Network { .. } => "network",
			Self::Cancelled { .. } => "cancelled",
			Self::Parsing(_) => "parsing",
			Self::Response(_) => "response",
		}
	}
}
impl From<TransportError> for Error {
	fn from(e: TransportError) -> Self {
		match e {
			TransportError::Network { source } => Self::Network { source },
			TransportError::Cancelled { source } => Self::Cancelled { source },
			TransportError::Status { status, body } => ResponseError::unmapped(status, body).into(),
		}
	}
}

/// Provider-reported failure carrying the HTTP status and the normalized error code.
///
/// Transports raise it without an error code; the pipeline re-raises it once the
/// endpoint's extractor has read the provider's vocabulary out of `raw_body`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error(
	"OAuth server responded with HTTP {status} ({}): {message}",
	.error_code.as_deref().unwrap_or("unmapped")
)]
pub struct ResponseError {
	/// HTTP status code (forced to 200 for body-level failures).
	pub status: u16,
	/// Normalized provider error code.
	pub error_code: Option<String>,
	/// Raw response body as received.
	pub raw_body: String,
	/// Human-readable message.
	pub message: String,
}
impl ResponseError {
	const UNMAPPED_MESSAGE: &'static str = "OAuth server returned an error.";

	/// Builds a failure that has not been through error extraction yet.
	pub fn unmapped(status: u16, raw_body: impl Into<String>) -> Self {
		Self {
			status,
			error_code: None,
			raw_body: raw_body.into(),
			message: Self::UNMAPPED_MESSAGE.into(),
		}
	}

	/// Builds a fully populated failure from an extracted detail.
	pub fn new(status: u16, detail: ErrorDetail, raw_body: impl Into<String>) -> Self {
		Self {
			status,
			error_code: Some(detail.error_code),
			raw_body: raw_body.into(),
			message: detail.message,
		}
	}

	/// Replaces the code and message with an extracted detail, keeping status and body.
	pub fn with_detail(self, detail: ErrorDetail) -> Self {
		Self::new(self.status, detail, self.raw_body)
	}
}

/// Decode failure for a body the transport considered successful.
#[derive(Debug, ThisError)]
#[error("Failed to parse {response_type} response at `{path}`: {source}")]
pub struct ParsingError {
	/// Short name of the type the body was decoded into.
	pub response_type: &'static str,
	/// JSON path where decoding stopped (`.` for the document root).
	pub path: String,
	/// Underlying JSON failure.
	#[source]
	pub source: serde_json::Error,
}
impl ParsingError {
	/// Wraps a decode failure for the response type `R`.
	pub fn new<R>(path: impl Into<String>, source: serde_json::Error) -> Self {
		Self { response_type: short_type_name::<R>(), path: path.into(), source }
	}
}

/// Outcome reported by an [`HttpTransport`](crate::http::HttpTransport) call.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The exchange could not be completed.
	#[error("Network error occurred while calling the OAuth server.")]
	Network {
		/// Transport-specific cause.
		#[source]
		source: BoxError,
	},
	/// The call was abandoned because its cancellation signal fired.
	#[error("Call to the OAuth server was cancelled.")]
	Cancelled {
		/// Cancellation cause.
		#[source]
		source: BoxError,
	},
	/// The server answered outside the accepted status range.
	#[error("OAuth server returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a cancellation cause.
	pub fn cancelled(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Cancelled { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Builder misuse detected before any request is constructed.
#[derive(Debug, ThisError)]
pub enum ValidationError {
	/// A required parameter is absent or blank.
	#[error("Required parameter [{name}] is missing.")]
	MissingParameter {
		/// Parameter name.
		name: String,
	},
	/// The `Authorization` header does not carry a bearer token.
	#[error("A valid access token is required to call {endpoint}.")]
	MissingBearerToken {
		/// Endpoint label.
		endpoint: &'static str,
	},
	/// The endpoint URI cannot be parsed.
	#[error("Endpoint URI `{uri}` is invalid: {reason}.")]
	InvalidEndpoint {
		/// Offending URI.
		uri: String,
		/// Parser explanation.
		reason: String,
	},
}

/// Transport configuration failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

fn short_type_name<R>() -> &'static str {
	let full = std::any::type_name::<R>();
	let base = full.split('<').next().unwrap_or(full);

	base.rsplit("::").next().unwrap_or(base)
}
