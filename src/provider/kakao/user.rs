// std
use std::ops::Deref;
// crates.io
use serde_json::{Map, Value};
use time::OffsetDateTime;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::ValidationError,
	http::HttpTransport,
	provider,
	request::{Endpoint, Request, RequestBuilder},
};

/// Account fields selectable through `property_keys`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KakaoPropertyKey {
	/// Nickname and profile images.
	Profile,
	/// Real name.
	Name,
	/// Email address.
	Email,
	/// Age bracket.
	AgeRange,
	/// Birthday (`MMDD`).
	Birthday,
	/// Gender.
	Gender,
}
impl KakaoPropertyKey {
	/// Returns the dotted path Kakao expects, e.g. `kakao_account.email`.
	pub const fn as_str(self) -> &'static str {
		match self {
			KakaoPropertyKey::Profile => "kakao_account.profile",
			KakaoPropertyKey::Name => "kakao_account.name",
			KakaoPropertyKey::Email => "kakao_account.email",
			KakaoPropertyKey::AgeRange => "kakao_account.age_range",
			KakaoPropertyKey::Birthday => "kakao_account.birthday",
			KakaoPropertyKey::Gender => "kakao_account.gender",
		}
	}
}
impl Display for KakaoPropertyKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Builder for the Kakao profile lookup.
///
/// An `Authorization: Bearer <token>` header is mandatory; set it with
/// [`access_token`](Self::access_token).
#[derive(Debug)]
pub struct KakaoUserRequestBuilder(RequestBuilder<KakaoUserResponse>);
impl KakaoUserRequestBuilder {
	pub(crate) fn new(transport: Arc<dyn HttpTransport>, endpoint: Endpoint) -> Self {
		Self(provider::form_request(transport, endpoint).require_bearer())
	}

	/// Access token issued by the token endpoint.
	pub fn access_token(self, access_token: impl Into<TokenSecret>) -> Self {
		let header = access_token.into().bearer();

		Self(self.0.header(RequestBuilder::<KakaoUserResponse>::AUTHORIZATION, header))
	}

	/// Requests `https` image URLs in the profile.
	pub fn secure_resource(self, secure: bool) -> Self {
		Self(self.0.param("secure_resource", secure.to_string()))
	}

	/// Restricts the response to the given account fields.
	///
	/// An empty list leaves the parameter unset, so Kakao returns every consented field.
	pub fn property_keys<I>(self, keys: I) -> Self
	where
		I: IntoIterator<Item = KakaoPropertyKey>,
	{
		let keys = keys.into_iter().map(|key| Value::from(key.as_str())).collect::<Vec<_>>();

		if keys.is_empty() {
			return self;
		}

		Self(self.0.param("property_keys", Value::Array(keys).to_string()))
	}

	/// Adds or replaces an arbitrary header.
	pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
		Self(self.0.header(name, value))
	}

	/// Validates the bearer header and produces the request.
	pub fn build(self) -> Result<Request<KakaoUserResponse>, ValidationError> {
		self.0.build()
	}
}
impl Deref for KakaoUserRequestBuilder {
	type Target = RequestBuilder<KakaoUserResponse>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Profile returned by `/v2/user/me`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KakaoUserResponse {
	/// Service user ID.
	pub id: i64,
	/// Whether the user finished sign-up, for apps using manual sign-up.
	#[serde(default)]
	pub has_signed_up: Option<bool>,
	/// When the user connected to the app.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub connected_at: Option<OffsetDateTime>,
	/// When the user was last synchronized through Kakao Sync.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub synched_at: Option<OffsetDateTime>,
	/// App-defined user properties.
	#[serde(default)]
	pub properties: Option<Map<String, Value>>,
	/// Kakao account data, subject to consent.
	#[serde(default)]
	pub kakao_account: Option<KakaoAccount>,
	/// Partner data.
	#[serde(default)]
	pub partner: Option<KakaoPartner>,
}

/// Consent-gated Kakao account data.
///
/// Each `*_needs_agreement` flag tells whether the matching field needs further consent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KakaoAccount {
	/// Profile consent pending.
	pub profile_needs_agreement: Option<bool>,
	/// Nickname consent pending.
	pub profile_nickname_needs_agreement: Option<bool>,
	/// Profile image consent pending.
	pub profile_image_needs_agreement: Option<bool>,
	/// Nickname and profile images.
	pub profile: Option<KakaoProfile>,
	/// Name consent pending.
	pub name_needs_agreement: Option<bool>,
	/// Real name.
	pub name: Option<String>,
	/// Email consent pending.
	pub email_needs_agreement: Option<bool>,
	/// Whether the email is still valid.
	pub is_email_valid: Option<bool>,
	/// Whether the email was verified.
	pub is_email_verified: Option<bool>,
	/// Email address.
	pub email: Option<String>,
	/// Age range consent pending.
	pub age_range_needs_agreement: Option<bool>,
	/// Age bracket such as `20~29`.
	pub age_range: Option<String>,
	/// Birth year consent pending.
	pub birthyear_needs_agreement: Option<bool>,
	/// Birth year (`YYYY`).
	pub birthyear: Option<String>,
	/// Birthday consent pending.
	pub birthday_needs_agreement: Option<bool>,
	/// Birthday (`MMDD`).
	pub birthday: Option<String>,
	/// `SOLAR` or `LUNAR`.
	pub birthday_type: Option<String>,
	/// Whether a lunar birthday falls in a leap month.
	pub is_leap_month: Option<bool>,
	/// Gender consent pending.
	pub gender_needs_agreement: Option<bool>,
	/// `female` or `male`.
	pub gender: Option<String>,
	/// Phone number consent pending.
	pub phone_number_needs_agreement: Option<bool>,
	/// Phone number in `+82 00-0000-0000` form.
	pub phone_number: Option<String>,
	/// CI consent pending.
	pub ci_needs_agreement: Option<bool>,
	/// Connecting information.
	pub ci: Option<String>,
	/// When the CI was issued.
	#[serde(with = "time::serde::rfc3339::option")]
	pub ci_authenticated_at: Option<OffsetDateTime>,
}

/// Public profile of a Kakao account.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KakaoProfile {
	/// Nickname.
	pub nickname: Option<String>,
	/// 110x110 thumbnail URL.
	pub thumbnail_image_url: Option<String>,
	/// 640x640 profile image URL.
	pub profile_image_url: Option<String>,
	/// Whether the image is Kakao's default.
	pub is_default_image: Option<bool>,
	/// Whether the nickname is Kakao's default.
	pub is_default_nickname: Option<bool>,
}

/// Partner-scoped identifiers.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KakaoPartner {
	/// Partner UUID.
	pub uuid: Option<String>,
}
