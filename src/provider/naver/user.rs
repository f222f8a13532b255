// std
use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ValidationError,
	http::HttpTransport,
	provider,
	request::{Endpoint, Request, RequestBuilder},
};

/// Builder for the Naver profile lookup. Requires a bearer token.
#[derive(Debug)]
pub struct NaverUserRequestBuilder(RequestBuilder<NaverUserResponse>);
impl NaverUserRequestBuilder {
	pub(crate) fn new(transport: Arc<dyn HttpTransport>, endpoint: Endpoint) -> Self {
		Self(provider::form_request(transport, endpoint).require_bearer())
	}

	/// Access token issued by the token endpoint.
	pub fn access_token(self, access_token: impl Into<TokenSecret>) -> Self {
		let header = access_token.into().bearer();

		Self(self.0.header(RequestBuilder::<NaverUserResponse>::AUTHORIZATION, header))
	}

	/// Adds or replaces an arbitrary header.
	pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		Self(self.0.header(name, value))
	}

	/// Validates the bearer header and produces the request.
	pub fn build(self) -> Result<Request<NaverUserResponse>, ValidationError> {
		self.0.build()
	}
}
impl Deref for NaverUserRequestBuilder {
	type Target = RequestBuilder<NaverUserResponse>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Envelope returned by `/v1/nid/me`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NaverUserResponse {
	/// `00` on success.
	pub resultcode: String,
	/// `success` on success.
	pub message: String,
	/// Profile data.
	#[serde(default)]
	pub response: Option<NaverProfile>,
}

/// Naver member profile; every field is subject to consent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NaverProfile {
	/// Unique member ID per app.
	pub id: Option<String>,
	/// Nickname.
	pub nickname: Option<String>,
	/// Real name.
	pub name: Option<String>,
	/// Email address.
	pub email: Option<String>,
	/// `F`, `M`, or `U`.
	pub gender: Option<String>,
	/// Age bracket such as `20-29`.
	pub age: Option<String>,
	/// `MM-DD`.
	pub birthday: Option<String>,
	/// Profile image URL.
	pub profile_image: Option<String>,
	/// Birth year (`YYYY`).
	pub birthyear: Option<String>,
	/// Mobile number.
	pub mobile: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{http::Offline, provider::NaverClient};

	#[test]
	fn bearer_header_is_mandatory() {
		let client = NaverClient::with_transport(Arc::new(Offline));
		let err = client.user_info().build().expect_err("A token is mandatory.");

		assert!(matches!(err, ValidationError::MissingBearerToken { endpoint: "naver.user" }));
		assert!(
			client
				.user_info()
				.header("Authorization", "Token abc")
				.build()
				.is_err()
		);

		let builder = client.user_info().access_token("abc");

		assert_eq!(builder.headers().get("Authorization").map(String::as_str), Some("Bearer abc"));
		assert!(builder.build().is_ok());
	}

	#[test]
	fn profile_envelope_decodes() {
		let response: NaverUserResponse = serde_json::from_str(
			r#"{"resultcode":"00","message":"success","response":{"id":"32742776","nickname":"OpenAPI","age":"40-49","gender":"F","email":"openapi@naver.com","mobile":"010-0000-0000","name":"오픈 API","birthday":"10-01","birthyear":"1900"}}"#,
		)
		.expect("Naver profile payload should decode.");

		assert_eq!(response.resultcode, "00");

		let profile = response.response.expect("Profile should be present.");

		assert_eq!(profile.id.as_deref(), Some("32742776"));
		assert_eq!(profile.name.as_deref(), Some("오픈 API"));
		assert!(profile.profile_image.is_none());
	}
}
