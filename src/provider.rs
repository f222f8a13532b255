//! Provider endpoints, response shapes, and error vocabularies.
//!
//! `strategy` defines [`ResponseStrategy`], the hook pair the pipeline uses to read each
//! provider's error format. `kakao` and `naver` bind those strategies to their fixed
//! endpoints and expose typed builders through [`KakaoClient`] and [`NaverClient`].

pub mod kakao;
pub mod naver;
pub mod strategy;

pub use kakao::{
	KakaoAccount, KakaoClient, KakaoPartner, KakaoProfile, KakaoPropertyKey, KakaoTokenResponse,
	KakaoUserResponse,
};
pub use naver::{NaverClient, NaverProfile, NaverTokenResponse, NaverUserResponse};
pub use strategy::*;

// self
use crate::{
	_prelude::*,
	http::HttpTransport,
	request::{Endpoint, RequestBuilder},
};

/// `Content-Type` seeded on every provider request.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=utf-8";

/// Grant type used by both token endpoints.
pub const AUTHORIZATION_CODE: &str = "authorization_code";

fn form_request<R>(transport: Arc<dyn HttpTransport>, endpoint: Endpoint) -> RequestBuilder<R> {
	RequestBuilder::new(transport, endpoint).header("Content-Type", FORM_CONTENT_TYPE)
}
