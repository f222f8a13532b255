//! Optional observability hooks for the request pipeline.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every [`Request::execute`](crate::request::Request::execute)
//!   call in a span named `kr_oauth.request` carrying the `endpoint` label and HTTP `method`.
//! - Enable `metrics` to increment the `kr_oauth_request_total` counter for every
//!   attempt/success/failure, labeled by `endpoint` + `outcome`.
//!
//! Both hooks compile down to no-ops when their feature is disabled.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// The request is about to be dispatched.
	Attempt,
	/// The body decoded into the endpoint's response type.
	Success,
	/// Any failure returned to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
