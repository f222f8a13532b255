//! Kakao and Naver OAuth 2.0 clients built on one provider-agnostic request pipeline.
//!
//! Every call follows the same path: a provider builder validates its parameters, the
//! resulting [`request::Request`] encodes and dispatches them through an
//! [`http::HttpTransport`], and the response is either decoded into the endpoint's typed
//! payload or normalized into the shared [`error::Error`] taxonomy, whichever way the
//! provider chose to report the failure.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod http;
pub mod obs;
pub mod provider;
pub mod request;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		marker::PhantomData,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _};
