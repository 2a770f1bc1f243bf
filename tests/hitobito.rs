//! End-to-end login flow against a mock Hitobito instance, over `reqwest`.
#![cfg(feature = "reqwest")]

use hitobito_auth::{
	Hitobito, HitobitoConfig, Provider,
	provider::{ExchangeError, FetchError},
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> Hitobito<reqwest::Client> {
	let mut provider = Hitobito::new(HitobitoConfig::new(
		server.uri(),
		"test-client-id",
		"test-client-secret",
	));
	provider.setup().unwrap();
	provider
}

#[tokio::test]
async fn login_flow() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path("/oauth/token"))
		.and(body_string_contains("grant_type=authorization_code"))
		.and(body_string_contains("code=test-code"))
		.and(body_string_contains("client_id=test-client-id"))
		.and(body_string_contains("client_secret=test-client-secret"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"access_token": "test-access-token",
			"token_type": "Bearer",
			"expires_in": 7200,
			"refresh_token": "test-refresh-token",
			"scope": "with_roles",
			"created_at": 1700000000
		})))
		.expect(1)
		.mount(&server)
		.await;

	Mock::given(method("GET"))
		.and(path("/oauth/profile"))
		.and(header("authorization", "Bearer test-access-token"))
		.and(header("x-scope", "with_roles"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"id": 1,
			"email": "alice@example.org",
			"first_name": "Alice",
			"roles": [{
				"group_id": 2,
				"group_name": "Bundesebene",
				"role_name": "Mitglied",
				"role_class": "Group::Bund::Mitglied",
				"permissions": []
			}]
		})))
		.expect(1)
		.mount(&server)
		.await;

	let provider = provider(&server);

	let login_url = provider
		.login_url("https://app.example.org/_oauth", "csrf-state")
		.unwrap();
	assert!(login_url.starts_with(&format!("{}/oauth/authorize?", server.uri())));
	assert!(login_url.contains("state=csrf-state"));

	let token = provider
		.exchange_code("https://app.example.org/_oauth", "test-code")
		.await
		.unwrap();
	assert_eq!(token, "test-access-token");

	let user = provider.get_user(&token).await.unwrap();
	assert_eq!(user.id.as_deref(), Some("1"));
	assert_eq!(user.email.as_deref(), Some("alice@example.org"));
	assert_eq!(user.roles[0].group_name.as_deref(), Some("Bundesebene"));
}

#[tokio::test]
async fn rejected_code() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path("/oauth/token"))
		.respond_with(ResponseTemplate::new(400).set_body_json(json!({
			"error": "invalid_grant",
			"error_description": "The provided authorization grant is invalid."
		})))
		.expect(1)
		.mount(&server)
		.await;

	let result = provider(&server)
		.exchange_code("https://app.example.org/_oauth", "stale-code")
		.await;

	match result {
		Err(err @ ExchangeError::Client(_)) => {
			assert!(err.to_string().contains("invalid_grant"));
		}
		other => panic!("unexpected exchange result: {other:?}"),
	}
}

#[tokio::test]
async fn expired_token() {
	let server = MockServer::start().await;

	Mock::given(method("GET"))
		.and(path("/oauth/profile"))
		.respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
		.expect(1)
		.mount(&server)
		.await;

	let result = provider(&server).get_user("expired-token").await;

	assert!(matches!(result, Err(FetchError::Unauthorized(_))));
}

#[tokio::test]
async fn unreachable_instance() {
	let mut provider = Hitobito::new(HitobitoConfig::new("http://127.0.0.1:1", "id", "secret"));
	provider.setup().unwrap();

	assert!(matches!(
		provider.get_user("token").await,
		Err(FetchError::Transport(_))
	));
	assert!(matches!(
		provider.exchange_code("", "code").await,
		Err(ExchangeError::Client(_))
	));
}
