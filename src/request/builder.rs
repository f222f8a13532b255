// self
use crate::{
	_prelude::*,
	error::ValidationError,
	http::{Headers, HttpTransport},
	request::{Endpoint, Request},
};

/// Mutable accumulator for a [`Request`].
///
/// Headers and parameters overwrite earlier values with the same key. Validation is
/// deferred to [`build`](RequestBuilder::build), which either returns a complete request
/// or a [`ValidationError`].
pub struct RequestBuilder<R> {
	transport: Arc<dyn HttpTransport>,
	endpoint: Endpoint,
	headers: Headers,
	params: BTreeMap<String, String>,
	required: Vec<&'static str>,
	bearer_required: bool,
	_response: PhantomData<fn() -> R>,
}
impl<R> RequestBuilder<R> {
	/// Header carrying the access token for profile calls.
	pub const AUTHORIZATION: &'static str = "Authorization";
	/// Prefix every bearer `Authorization` value must start with.
	pub const BEARER_PREFIX: &'static str = "Bearer ";

	/// Creates an empty builder targeting `endpoint`.
	pub fn new(transport: Arc<dyn HttpTransport>, endpoint: Endpoint) -> Self {
		Self {
			transport,
			endpoint,
			headers: Headers::new(),
			params: BTreeMap::new(),
			required: Vec::new(),
			bearer_required: false,
			_response: PhantomData,
		}
	}

	/// Sets a header, replacing any previous value.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}

	/// Sets a parameter, replacing any previous value.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name.into(), value.into());

		self
	}

	/// Marks parameters that must be present and non-blank at build time.
	pub fn require<I>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = &'static str>,
	{
		for name in names {
			if !self.required.contains(&name) {
				self.required.push(name);
			}
		}

		self
	}

	/// Requires an `Authorization: Bearer <token>` header at build time.
	pub fn require_bearer(mut self) -> Self {
		self.bearer_required = true;

		self
	}

	/// Returns the endpoint this builder targets.
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}

	/// Returns the headers accumulated so far.
	pub fn headers(&self) -> &Headers {
		&self.headers
	}

	/// Returns the parameters accumulated so far.
	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}

	/// Checks that every name in `required` maps to a non-blank parameter.
	pub fn validate(&self, required: &[&str]) -> Result<(), ValidationError> {
		match required.iter().find(|name| is_blank(self.params.get(**name))) {
			Some(name) => Err(ValidationError::MissingParameter { name: (*name).to_owned() }),
			None => Ok(()),
		}
	}

	/// Checks that the `Authorization` header carries a bearer token.
	pub fn validate_bearer(&self) -> Result<(), ValidationError> {
		match self.headers.get(Self::AUTHORIZATION) {
			Some(value) if !value.trim().is_empty() && value.starts_with(Self::BEARER_PREFIX) =>
				Ok(()),
			_ => Err(ValidationError::MissingBearerToken { endpoint: self.endpoint.label }),
		}
	}

	/// Validates the accumulated state and freezes it into a [`Request`].
	///
	/// The endpoint URI is parsed into its normalized form (lowercase scheme and host,
	/// `/` for an empty path), which is the exact target a parameterless `GET` hits.
	pub fn build(self) -> Result<Request<R>, ValidationError> {
		let uri = Url::parse(&self.endpoint.uri).map_err(|e| ValidationError::InvalidEndpoint {
			uri: self.endpoint.uri.to_string(),
			reason: e.to_string(),
		})?;

		self.validate(&self.required)?;

		if self.bearer_required {
			self.validate_bearer()?;
		}

		Ok(Request {
			transport: self.transport,
			label: self.endpoint.label,
			method: self.endpoint.method,
			uri,
			strategy: self.endpoint.strategy,
			headers: self.headers,
			params: self.params,
			_response: PhantomData,
		})
	}
}
impl<R> Debug for RequestBuilder<R> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestBuilder")
			.field("endpoint", &self.endpoint)
			.field("headers", &self.headers.keys().collect::<Vec<_>>())
			.field("params", &self.params.keys().collect::<Vec<_>>())
			.field("required", &self.required)
			.field("bearer_required", &self.bearer_required)
			.finish_non_exhaustive()
	}
}

fn is_blank(value: Option<&String>) -> bool {
	value.is_none_or(|value| value.trim().is_empty())
}
