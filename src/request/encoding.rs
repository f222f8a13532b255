//! Form encoding and dispatch-URI assembly.

// crates.io
use url::form_urlencoded::Serializer;
// self
use crate::_prelude::*;

/// Encodes parameters as `application/x-www-form-urlencoded` pairs.
///
/// Keys and values are UTF-8 percent-encoded (space becomes `+`) and joined with `&`;
/// an empty map encodes to an empty string.
pub fn encode_params(params: &BTreeMap<String, String>) -> String {
	Serializer::new(String::new()).extend_pairs(params).finish()
}

/// Appends an encoded query to `uri`, reusing an existing query component when present.
pub fn dispatch_uri(uri: &Url, encoded: &str) -> Url {
	if encoded.is_empty() {
		return uri.clone();
	}

	let mut target = uri.clone();
	let query = match uri.query() {
		Some(existing) => format!("{existing}&{encoded}"),
		None => encoded.to_owned(),
	};

	target.set_query(Some(&query));

	target
}
