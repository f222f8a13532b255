// std
use std::ops::Deref;
// crates.io
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ValidationError,
	http::HttpTransport,
	provider::{self, AUTHORIZATION_CODE},
	request::{Endpoint, Request, RequestBuilder},
};

/// Builder for the Naver authorization-code exchange.
///
/// All of `grant_type` (seeded), `client_id`, `client_secret`, `code`, and `state` are
/// required.
#[derive(Debug)]
pub struct NaverTokenRequestBuilder(RequestBuilder<NaverTokenResponse>);
impl NaverTokenRequestBuilder {
	const REQUIRED: [&'static str; 5] = ["grant_type", "client_id", "client_secret", "code", "state"];

	pub(crate) fn new(transport: Arc<dyn HttpTransport>, endpoint: Endpoint) -> Self {
		Self(
			provider::form_request(transport, endpoint)
				.param("grant_type", AUTHORIZATION_CODE)
				.require(Self::REQUIRED),
		)
	}

	/// Client ID issued on app registration.
	pub fn client_id(self, client_id: impl Into<String>) -> Self {
		Self(self.0.param("client_id", client_id))
	}

	/// Client secret issued on app registration.
	pub fn client_secret(self, client_secret: impl Into<String>) -> Self {
		Self(self.0.param("client_secret", client_secret))
	}

	/// Authorization code received on the callback.
	pub fn code(self, code: impl Into<String>) -> Self {
		Self(self.0.param("code", code))
	}

	/// CSRF state value echoed on the callback.
	pub fn state(self, state: impl Into<String>) -> Self {
		Self(self.0.param("state", state))
	}

	/// Adds or replaces an arbitrary header.
	pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		Self(self.0.header(name, value))
	}

	/// Validates the parameters and produces the request.
	pub fn build(self) -> Result<Request<NaverTokenResponse>, ValidationError> {
		self.0.build()
	}
}
impl Deref for NaverTokenRequestBuilder {
	type Target = RequestBuilder<NaverTokenResponse>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Tokens issued by `nid.naver.com`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NaverTokenResponse {
	/// Access token for open API calls.
	pub access_token: TokenSecret,
	/// Refresh token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Usually `bearer`.
	pub token_type: String,
	/// Access token lifetime in seconds; Naver sends it as a string.
	#[serde(deserialize_with = "lenient_u64")]
	pub expires_in: u64,
	/// Error code, only present on failures.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Error description, only present on failures.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Lenient {
		Number(u64),
		Text(String),
	}

	match Lenient::deserialize(deserializer)? {
		Lenient::Number(value) => Ok(value),
		Lenient::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
	}
}
