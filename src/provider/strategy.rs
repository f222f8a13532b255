//! Response strategy hooks that teach the pipeline each provider's error vocabulary.
//!
//! Implementations translate raw bodies into an [`ErrorDetail`] and, when a provider
//! reports failures inside successful responses, reject those bodies before decoding.
//! Both hooks are total: a malformed body degrades into a synthetic detail instead of
//! masking the original failure with a decode error.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::ResponseError};

/// Strategy hook bound to an [`Endpoint`](crate::request::Endpoint).
///
/// Only [`parse_error`](ResponseStrategy::parse_error) is mandatory;
/// `validate_success` defaults to accepting every body, which is right for providers that
/// signal failures through the HTTP status alone.
pub trait ResponseStrategy: Send + Sync + Debug {
	/// Extracts the normalized error code and message from a raw error body.
	fn parse_error(&self, body: &str) -> ErrorDetail;

	/// Rejects bodies that report a failure despite a successful status.
	fn validate_success(&self, _body: &str) -> Result<(), ResponseError> {
		Ok(())
	}
}

/// Normalized provider failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorDetail {
	/// Provider error code (e.g. `KOE320`, `invalid_request`, `-401`).
	pub error_code: String,
	/// Human-readable message.
	pub message: String,
}
impl ErrorDetail {
	/// Code used when the error body itself cannot be read.
	pub const PARSING_ERROR: &'static str = "PARSING_ERROR";

	/// Creates a detail from a code and message.
	pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { error_code: error_code.into(), message: message.into() }
	}

	/// Synthetic detail embedding the unreadable body.
	pub fn parsing_failed(service: &str, body: &str) -> Self {
		Self::new(Self::PARSING_ERROR, format!("Failed to parse {service} error: {body}"))
	}
}

/// Marker for a selected field whose value is not a JSON scalar.
#[derive(Clone, Copy, Debug)]
pub struct NotScalar;

/// Top-level fields of a JSON object body.
#[derive(Clone, Debug)]
pub struct ErrorFields(Map<String, Value>);
impl ErrorFields {
	/// Parses `body` as a JSON object; anything else yields `None`.
	pub fn parse(body: &str) -> Option<Self> {
		match serde_json::from_str::<Value>(body).ok()? {
			Value::Object(map) => Some(Self(map)),
			_ => None,
		}
	}

	/// Returns true when `key` is present, whatever its value (including `null`).
	pub fn contains(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	/// Returns the value of the first key present in `keys`, rendered as text.
	///
	/// Later keys are only consulted when earlier ones are absent; a present but
	/// non-scalar value is an error rather than a reason to fall through.
	pub fn first_of(&self, keys: &[&str]) -> Result<Option<String>, NotScalar> {
		let Some(value) = keys.iter().find_map(|key| self.0.get(*key)) else {
			return Ok(None);
		};

		match value {
			Value::String(text) => Ok(Some(text.clone())),
			Value::Number(number) => Ok(Some(number.to_string())),
			Value::Bool(flag) => Ok(Some(flag.to_string())),
			Value::Null | Value::Array(_) | Value::Object(_) => Err(NotScalar),
		}
	}
}

/// Runs `extract` over the parsed body, falling back to [`ErrorDetail::parsing_failed`].
pub fn extract_detail<F>(service: &str, body: &str, extract: F) -> ErrorDetail
where
	F: FnOnce(&ErrorFields) -> Result<ErrorDetail, NotScalar>,
{
	ErrorFields::parse(body)
		.and_then(|fields| extract(&fields).ok())
		.unwrap_or_else(|| ErrorDetail::parsing_failed(service, body))
}
