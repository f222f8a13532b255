//! Naver Login: `nid` token exchange and `openapi` profile lookup.
//!
//! The token endpoint reports some failures with HTTP 200 and an `error` field in the
//! body, so [`NaverAuthStrategy`] overrides the success hook to reject them.

mod token;
mod user;

pub use token::*;
pub use user::*;

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	error::ResponseError,
	http::{HttpTransport, Method},
	provider::{ErrorDetail, ErrorFields, ResponseStrategy, strategy},
	request::Endpoint,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestTransport};

/// Authorization-code exchange on `nid.naver.com`.
pub const TOKEN_ENDPOINT: Endpoint = Endpoint::new(
	"naver.token",
	Method::Post,
	"https://nid.naver.com/oauth2.0/token",
	&NaverAuthStrategy,
);
/// Profile lookup on `openapi.naver.com`.
pub const USER_ENDPOINT: Endpoint = Endpoint::new(
	"naver.user",
	Method::Get,
	"https://openapi.naver.com/v1/nid/me",
	&NaverApiStrategy,
);

/// Error vocabulary of the Naver token endpoint (`error` / `error_description`).
#[derive(Clone, Copy, Debug, Default)]
pub struct NaverAuthStrategy;
impl ResponseStrategy for NaverAuthStrategy {
	fn parse_error(&self, body: &str) -> ErrorDetail {
		strategy::extract_detail("Naver auth", body, |fields| {
			let code = fields.first_of(&["error"])?;
			let message = fields.first_of(&["error_description"])?;

			Ok(ErrorDetail::new(
				code.unwrap_or_else(|| "NAVER_AUTH_ERROR".into()),
				message.unwrap_or_else(|| "No description provided".into()),
			))
		})
	}

	fn validate_success(&self, body: &str) -> Result<(), ResponseError> {
		match ErrorFields::parse(body) {
			Some(fields) if fields.contains("error") =>
				Err(ResponseError::new(200, self.parse_error(body), body)),
			_ => Ok(()),
		}
	}
}

/// Error vocabulary of the Naver open API (`resultcode`/`errorCode`, `message`/`errorMessage`).
#[derive(Clone, Copy, Debug, Default)]
pub struct NaverApiStrategy;
impl ResponseStrategy for NaverApiStrategy {
	fn parse_error(&self, body: &str) -> ErrorDetail {
		strategy::extract_detail("Naver API", body, |fields| {
			let code = fields.first_of(&["resultcode", "errorCode"])?;
			let message = fields.first_of(&["message", "errorMessage"])?;

			Ok(ErrorDetail::new(
				code.unwrap_or_else(|| "NAVER_API_ERROR".into()),
				message.unwrap_or_else(|| "No error message provided".into()),
			))
		})
	}
}

/// Entry point for Naver calls sharing one transport.
#[derive(Clone)]
pub struct NaverClient {
	transport: Arc<dyn HttpTransport>,
	token_endpoint: Endpoint,
	user_endpoint: Endpoint,
}
impl NaverClient {
	/// Creates a client backed by a default [`ReqwestTransport`].
	#[cfg(feature = "reqwest")]
	pub fn new() -> Result<Self, ConfigError> {
		Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
	}

	/// Creates a client backed by a caller-supplied transport.
	pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
		Self { transport, token_endpoint: TOKEN_ENDPOINT, user_endpoint: USER_ENDPOINT }
	}

	/// Redirects token calls to another URI.
	pub fn with_token_uri(mut self, uri: impl Into<Cow<'static, str>>) -> Self {
		self.token_endpoint = self.token_endpoint.with_uri(uri);

		self
	}

	/// Redirects profile calls to another URI.
	pub fn with_user_uri(mut self, uri: impl Into<Cow<'static, str>>) -> Self {
		self.user_endpoint = self.user_endpoint.with_uri(uri);

		self
	}

	/// Starts an authorization-code exchange.
	pub fn token(&self) -> NaverTokenRequestBuilder {
		NaverTokenRequestBuilder::new(self.transport.clone(), self.token_endpoint.clone())
	}

	/// Starts a profile lookup.
	pub fn user_info(&self) -> NaverUserRequestBuilder {
		NaverUserRequestBuilder::new(self.transport.clone(), self.user_endpoint.clone())
	}
}
impl Debug for NaverClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("NaverClient")
			.field("token_endpoint", &self.token_endpoint.uri)
			.field("user_endpoint", &self.user_endpoint.uri)
			.finish_non_exhaustive()
	}
}
