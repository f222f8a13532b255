//! Fetches the Kakao profile behind an access token.
//!
//! ```sh
//! cargo run --example kakao_profile -- <ACCESS_TOKEN>
//! ```
//!
//! Provider failures are printed with their normalized code instead of aborting.

// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use kr_oauth::{
	error::Error,
	provider::{KakaoClient, KakaoPropertyKey},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let access_token = std::env::args()
		.nth(1)
		.ok_or_else(|| eyre!("Usage: kakao_profile <ACCESS_TOKEN>"))?;
	let client = KakaoClient::new()?;
	let request = client
		.user_info()
		.access_token(access_token)
		.secure_resource(true)
		.property_keys([KakaoPropertyKey::Profile, KakaoPropertyKey::Email])
		.build()?;

	match request.execute().await {
		Ok(user) => {
			let account = user.kakao_account.unwrap_or_default();
			let nickname = account.profile.and_then(|profile| profile.nickname);

			println!("id: {}", user.id);
			println!("nickname: {}", nickname.as_deref().unwrap_or("-"));
			println!("email: {}", account.email.as_deref().unwrap_or("-"));
		},
		Err(Error::Response(response)) => {
			println!(
				"Kakao rejected the call with HTTP {} [{}]: {}",
				response.status,
				response.error_code.as_deref().unwrap_or("-"),
				response.message
			);
		},
		Err(e) => return Err(e.into()),
	}

	Ok(())
}
