//! Kakao Login: `kauth` token exchange and `kapi` profile lookup.

mod token;
mod user;

pub use token::*;
pub use user::*;

// std
use std::borrow::Cow;
// self
use crate::{
	_prelude::*,
	http::{HttpTransport, Method},
	provider::{ErrorDetail, ResponseStrategy, strategy},
	request::Endpoint,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestTransport};

/// Authorization-code exchange on `kauth.kakao.com`.
pub const TOKEN_ENDPOINT: Endpoint = Endpoint::new(
	"kakao.token",
	Method::Post,
	"https://kauth.kakao.com/oauth/token",
	&KakaoAuthStrategy,
);
/// Profile lookup on `kapi.kakao.com`.
pub const USER_ENDPOINT: Endpoint = Endpoint::new(
	"kakao.user",
	Method::Get,
	"https://kapi.kakao.com/v2/user/me",
	&KakaoApiStrategy,
);

/// Error vocabulary of `kauth` (`error_code` / `error` / `error_description`).
#[derive(Clone, Copy, Debug, Default)]
pub struct KakaoAuthStrategy;
impl ResponseStrategy for KakaoAuthStrategy {
	fn parse_error(&self, body: &str) -> ErrorDetail {
		strategy::extract_detail("kauth", body, |fields| {
			let code = fields.first_of(&["error_code", "error"])?;
			let message = fields.first_of(&["error_description"])?;

			Ok(ErrorDetail::new(
				code.unwrap_or_else(|| "UNKNOWN_KAUTH_ERROR".into()),
				message.unwrap_or_else(|| "No error description provided.".into()),
			))
		})
	}
}

/// Error vocabulary of `kapi` (`code` / `msg`).
#[derive(Clone, Copy, Debug, Default)]
pub struct KakaoApiStrategy;
impl ResponseStrategy for KakaoApiStrategy {
	fn parse_error(&self, body: &str) -> ErrorDetail {
		strategy::extract_detail("kapi", body, |fields| {
			let code = fields.first_of(&["code"])?;
			let message = fields.first_of(&["msg"])?;

			Ok(ErrorDetail::new(
				code.unwrap_or_else(|| "UNKNOWN_KAPI_ERROR".into()),
				message.unwrap_or_else(|| "No error message provided.".into()),
			))
		})
	}
}

/// Entry point for Kakao calls sharing one transport.
#[derive(Clone)]
pub struct KakaoClient {
	transport: Arc<dyn HttpTransport>,
	token_endpoint: Endpoint,
	user_endpoint: Endpoint,
}
impl KakaoClient {
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
	pub fn token(&self) -> KakaoTokenRequestBuilder {
		KakaoTokenRequestBuilder::new(self.transport.clone(), self.token_endpoint.clone())
	}

	/// Starts a profile lookup.
	pub fn user_info(&self) -> KakaoUserRequestBuilder {
		KakaoUserRequestBuilder::new(self.transport.clone(), self.user_endpoint.clone())
	}
}
impl Debug for KakaoClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("KakaoClient")
			.field("token_endpoint", &self.token_endpoint.uri)
			.field("user_endpoint", &self.user_endpoint.uri)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn kauth_prefers_error_code_over_error() {
		let detail = KakaoAuthStrategy.parse_error(
			r#"{"error":"invalid_grant","error_description":"authorization code not found for code=abc","error_code":"KOE320"}"#,
		);

		assert_eq!(detail.error_code, "KOE320");
		assert_eq!(detail.message, "authorization code not found for code=abc");

		let detail = KakaoAuthStrategy.parse_error(r#"{"error":"invalid_client"}"#);

		assert_eq!(detail.error_code, "invalid_client");
		assert_eq!(detail.message, "No error description provided.");
	}

	#[test]
	fn kauth_falls_back_to_defaults_and_parsing_error() {
		let detail = KakaoAuthStrategy.parse_error("{}");

		assert_eq!(detail, ErrorDetail::new("UNKNOWN_KAUTH_ERROR", "No error description provided."));

		let detail = KakaoAuthStrategy.parse_error("Bad Gateway");

		assert_eq!(detail.error_code, ErrorDetail::PARSING_ERROR);
		assert_eq!(detail.message, "Failed to parse kauth error: Bad Gateway");
	}

	#[test]
	fn kapi_renders_numeric_codes() {
		let detail =
			KakaoApiStrategy.parse_error(r#"{"msg":"this access token does not exist","code":-401}"#);

		assert_eq!(detail, ErrorDetail::new("-401", "this access token does not exist"));

		let detail = KakaoApiStrategy.parse_error(r#"{"code":{"nested":true}}"#);

		assert_eq!(detail.error_code, ErrorDetail::PARSING_ERROR);

		let detail = KakaoApiStrategy.parse_error("[]");

		assert_eq!(detail.message, "Failed to parse kapi error: []");
	}

	#[test]
	fn endpoints_point_at_kakao_hosts() {
		assert_eq!(TOKEN_ENDPOINT.method, Method::Post);
		assert_eq!(TOKEN_ENDPOINT.uri, "https://kauth.kakao.com/oauth/token");
		assert_eq!(USER_ENDPOINT.method, Method::Get);
		assert_eq!(USER_ENDPOINT.uri, "https://kapi.kakao.com/v2/user/me");
	}
}
