// std
use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ValidationError,
	http::HttpTransport,
	provider::{self, AUTHORIZATION_CODE},
	request::{Endpoint, Request, RequestBuilder},
};

/// Builder for the Kakao authorization-code exchange.
///
/// Seeds `grant_type=authorization_code`; `client_id`, `redirect_uri`, and `code` must be
/// set before [`build`](Self::build) succeeds. `client_secret` is only needed when the app
/// enabled it in the Kakao console.
#[derive(Debug)]
pub struct KakaoTokenRequestBuilder(RequestBuilder<KakaoTokenResponse>);
impl KakaoTokenRequestBuilder {
	const REQUIRED: [&'static str; 4] = ["grant_type", "client_id", "redirect_uri", "code"];

	pub(crate) fn new(transport: Arc<dyn HttpTransport>, endpoint: Endpoint) -> Self {
		Self(
			provider::form_request(transport, endpoint)
				.param("grant_type", AUTHORIZATION_CODE)
				.require(Self::REQUIRED),
		)
	}

	/// REST API key of the app.
	pub fn client_id(self, client_id: impl Into<String>) -> Self {
		Self(self.0.param("client_id", client_id))
	}

	/// Redirect URI registered for the app; must match the authorize call.
	pub fn redirect_uri(self, redirect_uri: impl Into<String>) -> Self {
		Self(self.0.param("redirect_uri", redirect_uri))
	}

	/// Authorization code received on the redirect.
	pub fn code(self, code: impl Into<String>) -> Self {
		Self(self.0.param("code", code))
	}

	/// Client secret, when enabled for the app.
	pub fn client_secret(self, client_secret: impl Into<String>) -> Self {
		Self(self.0.param("client_secret", client_secret))
	}

	/// Adds or replaces an arbitrary header.
	pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		Self(self.0.header(name, value))
	}

	/// Validates the parameters and produces the request.
	pub fn build(self) -> Result<Request<KakaoTokenResponse>, ValidationError> {
		self.0.build()
	}
}
impl Deref for KakaoTokenRequestBuilder {
	type Target = RequestBuilder<KakaoTokenResponse>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Tokens issued by `kauth`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KakaoTokenResponse {
	/// Always `bearer`.
	pub token_type: String,
	/// Access token for `kapi` calls.
	pub access_token: TokenSecret,
	/// OpenID Connect ID token, present when the `openid` scope was granted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token: Option<TokenSecret>,
	/// Access token lifetime in seconds.
	pub expires_in: u64,
	/// Refresh token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Refresh token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token_expires_in: Option<u64>,
	/// Space-delimited scopes granted to the token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		http::Offline,
		provider::{FORM_CONTENT_TYPE, KakaoClient},
	};

	fn client() -> KakaoClient {
		KakaoClient::with_transport(Arc::new(Offline))
	}

	#[test]
	fn seeds_grant_type_and_content_type() {
		let builder = client().token();

		assert_eq!(builder.params().get("grant_type").map(String::as_str), Some("authorization_code"));
		assert_eq!(
			builder.headers().get("Content-Type").map(String::as_str),
			Some(FORM_CONTENT_TYPE)
		);
	}

	#[test]
	fn each_required_parameter_is_enforced() {
		let complete = || {
			client().token().client_id("id").redirect_uri("http://localhost/callback").code("c")
		};

		assert!(complete().build().is_ok());
		assert!(complete().client_secret("secret").build().is_ok());

		let cases = [
			("client_id", complete().client_id(" ")),
			("redirect_uri", complete().redirect_uri("")),
			("code", complete().code("\t")),
		];

		for (name, builder) in cases {
			match builder.build() {
				Err(ValidationError::MissingParameter { name: missing }) => assert_eq!(missing, name),
				other => panic!("Blank {name} should be rejected, got {other:?}."),
			}
		}
	}

	#[test]
	fn token_response_decodes_optional_fields() {
		let response: KakaoTokenResponse = serde_json::from_str(
			r#"{"token_type":"bearer","access_token":"X","expires_in":21599,"refresh_token":"R","refresh_token_expires_in":5183999,"scope":"profile_nickname"}"#,
		)
		.expect("Kakao token payload should decode.");

		assert_eq!(response.access_token.expose(), "X");
		assert_eq!(response.refresh_token.as_ref().map(TokenSecret::expose), Some("R"));
		assert!(response.id_token.is_none());
		assert_eq!(response.refresh_token_expires_in, Some(5_183_999));
	}
}
