mod common;

// std
use std::sync::Arc;
// crates.io
use serde::Deserialize;
// self
use common::{Reply, ScriptedTransport, pair};
use kr_oauth::{
	error::{Error, ResponseError, Result},
	http::Method,
	provider::{ErrorDetail, ErrorFields, ResponseStrategy, strategy},
	request::{Endpoint, RequestBuilder},
};

#[derive(Debug)]
struct EchoStrategy;
impl ResponseStrategy for EchoStrategy {
	fn parse_error(&self, body: &str) -> ErrorDetail {
		strategy::extract_detail("echo", body, |fields| {
			Ok(ErrorDetail::new(
				fields.first_of(&["code"])?.unwrap_or_else(|| "NONE".into()),
				fields.first_of(&["reason"])?.unwrap_or_default(),
			))
		})
	}

	fn validate_success(&self, body: &str) -> Result<(), ResponseError> {
		match ErrorFields::parse(body) {
			Some(fields) if fields.contains("code") =>
				Err(ResponseError::new(200, self.parse_error(body), body)),
			_ => Ok(()),
		}
	}
}

#[derive(Debug, Deserialize)]
struct Echo {
	value: String,
}

fn builder(
	transport: &Arc<ScriptedTransport>,
	method: Method,
	uri: &'static str,
) -> RequestBuilder<Echo> {
	RequestBuilder::new(transport.clone(), Endpoint::new("echo", method, uri, &EchoStrategy))
}

async fn execute(transport: &Arc<ScriptedTransport>, method: Method) -> Result<Echo> {
	builder(transport, method, "https://api.example.com/me")
		.build()
		.expect("Request should build.")
		.execute()
		.await
}

#[tokio::test]
async fn get_appends_params_with_matching_connector() {
	let transport =
		ScriptedTransport::new([Reply::ok(r#"{"value":"a"}"#), Reply::ok(r#"{"value":"b"}"#)]);
	let first = builder(&transport, Method::Get, "https://api.example.com/me")
		.param("p", "1")
		.build()
		.expect("GET request should build.")
		.execute()
		.await
		.expect("GET request should succeed.");
	let second = builder(&transport, Method::Get, "https://api.example.com/me?base=true")
		.param("p", "1")
		.build()
		.expect("GET request should build.")
		.execute()
		.await
		.expect("GET request should succeed.");

	assert_eq!(first.value, "a");
	assert_eq!(second.value, "b");

	let requests = transport.requests();

	assert_eq!(requests[0].method, Method::Get);
	assert_eq!(requests[0].uri.as_str(), "https://api.example.com/me?p=1");
	assert_eq!(requests[1].uri.as_str(), "https://api.example.com/me?base=true&p=1");
	assert!(requests.iter().all(|r| r.body.is_none()));
}

#[tokio::test]
async fn get_without_params_uses_endpoint_uri_verbatim() {
	let transport = ScriptedTransport::new([Reply::ok(r#"{"value":"a"}"#)]);

	builder(&transport, Method::Get, "https://api.example.com/me")
		.header("Authorization", "Bearer t")
		.build()
		.expect("GET request should build.")
		.execute()
		.await
		.expect("GET request should succeed.");

	let request = transport.only_request();

	assert_eq!(request.uri.as_str(), "https://api.example.com/me");
	assert_eq!(request.header("Authorization"), Some("Bearer t"));
}

#[tokio::test]
async fn post_sends_form_body_to_unmodified_uri() {
	let transport = ScriptedTransport::new([Reply::ok(r#"{"value":"ok"}"#)]);

	builder(&transport, Method::Post, "https://api.example.com/token?fixed=1")
		.param("name", "강희구")
		.param("redirect_uri", "http://localhost/cb?x=1")
		.build()
		.expect("POST request should build.")
		.execute()
		.await
		.expect("POST request should succeed.");

	let request = transport.only_request();

	assert_eq!(request.method, Method::Post);
	assert_eq!(request.uri.as_str(), "https://api.example.com/token?fixed=1");
	assert_eq!(
		request.body.as_deref(),
		Some("name=%EA%B0%95%ED%9D%AC%EA%B5%AC&redirect_uri=http%3A%2F%2Flocalhost%2Fcb%3Fx%3D1")
	);
	assert_eq!(
		request.form_pairs(),
		vec![pair("name", "강희구"), pair("redirect_uri", "http://localhost/cb?x=1")]
	);
}

#[tokio::test]
async fn status_boundaries_follow_inclusive_success_range() {
	let transport = ScriptedTransport::new([
		Reply::status(300, r#"{"value":"redirect-ish"}"#),
		Reply::status(299, r#"{"value":"ok"}"#),
		Reply::status(301, r#"{"code":"MOVED","reason":"gone"}"#),
		Reply::status(199, r#"{"code":"EARLY","reason":"info"}"#),
	]);
	let run = || execute(&transport, Method::Get);

	assert_eq!(run().await.expect("300 counts as success.").value, "redirect-ish");
	assert_eq!(run().await.expect("299 counts as success.").value, "ok");

	for (status, code) in [(301, "MOVED"), (199, "EARLY")] {
		let err = run().await.expect_err("Statuses outside the range should fail.");
		let response = err.as_response().expect("Status failures should be response errors.");

		assert_eq!(response.status, status);
		assert_eq!(response.error_code.as_deref(), Some(code));
	}
}

#[tokio::test]
async fn error_statuses_are_normalized_by_the_strategy() {
	let transport = ScriptedTransport::new([
		Reply::status(400, r#"{"code":"E1","reason":"bad input"}"#),
		Reply::status(502, "<html>Bad Gateway</html>"),
	]);
	let run = || execute(&transport, Method::Post);

	match run().await {
		Err(Error::Response(response)) => {
			assert_eq!(response.status, 400);
			assert_eq!(response.error_code.as_deref(), Some("E1"));
			assert_eq!(response.message, "bad input");
			assert_eq!(response.raw_body, r#"{"code":"E1","reason":"bad input"}"#);
		},
		other => panic!("Expected a response error, got {other:?}."),
	}
	match run().await {
		Err(Error::Response(response)) => {
			assert_eq!(response.status, 502);
			assert_eq!(response.error_code.as_deref(), Some("PARSING_ERROR"));
			assert_eq!(response.message, "Failed to parse echo error: <html>Bad Gateway</html>");
		},
		other => panic!("Expected a response error, got {other:?}."),
	}
}

#[tokio::test]
async fn success_hook_rejects_error_bodies_with_status_200() {
	let transport = ScriptedTransport::new([Reply::ok(r#"{"code":"E2","reason":"in body"}"#)]);
	let err = builder(&transport, Method::Post, "https://api.example.com/token")
		.build()
		.expect("Request should build.")
		.execute()
		.await
		.expect_err("Error bodies should be rejected.");
	let response = err.as_response().expect("Body failures should be response errors.");

	assert_eq!(response.status, 200);
	assert_eq!(response.error_code.as_deref(), Some("E2"));
	assert_eq!(response.message, "in body");
}

#[tokio::test]
async fn malformed_success_body_is_a_parsing_error() {
	let transport = ScriptedTransport::new([
		Reply::ok("{invalid-json}"),
		Reply::ok(r#"{"value":1}"#),
		Reply::ok(""),
	]);

	for _ in 0..3 {
		let err = builder(&transport, Method::Get, "https://api.example.com/me")
			.build()
			.expect("Request should build.")
			.execute()
			.await
			.expect_err("Malformed bodies should fail.");

		match err {
			Error::Parsing(parsing) => {
				assert_eq!(parsing.response_type, "Echo");
				assert!(parsing.to_string().contains("Echo"));
			},
			other => panic!("Expected a parsing error, got {other:?}."),
		}
	}
}

#[tokio::test]
async fn transport_failures_propagate_unchanged() {
	let transport = ScriptedTransport::new([Reply::NetworkDown, Reply::Cancelled]);
	let run = || execute(&transport, Method::Get);

	assert!(matches!(run().await, Err(Error::Network { .. })));
	assert!(matches!(run().await, Err(Error::Cancelled { .. })));
}
