//! Integration tests for the Guacamole API client.
//!
//! Tests cover:
//! - Token acquisition and its failure modes
//! - Best-effort token release
//! - Authenticated reads and status handling
//! - Token values never leaking into error messages

use axum::http::StatusCode;
use guacamole::{AuthError, AuthToken, Credentials, FetchError, Resource};

use super::common::{
    grant_body, spawn, test_client, test_credentials, unreachable_endpoint, FakeGuacamole, Reply,
    DATA_SOURCE, PASSWORD, TOKEN, USERNAME,
};

#[tokio::test]
async fn test_acquire_token() {
    let endpoint = spawn(FakeGuacamole::default()).await;

    let token = test_client()
        .acquire_token(&test_credentials(&endpoint))
        .await
        .unwrap();

    assert_eq!(token, AuthToken::new(TOKEN));
}

#[tokio::test]
async fn test_acquire_token_unlisted_data_source_still_succeeds() {
    let fake = FakeGuacamole {
        login: Reply::ok(grant_body(TOKEN, &["postgresql"])),
        ..FakeGuacamole::default()
    };
    let calls = fake.calls.clone();
    let endpoint = spawn(fake).await;

    let token = test_client()
        .acquire_token(&test_credentials(&endpoint))
        .await
        .unwrap();

    assert_eq!(token, AuthToken::new(TOKEN));
    assert_eq!(calls.logins(), 1);
}

#[tokio::test]
async fn test_login_returns_full_grant() {
    let fake = FakeGuacamole {
        login: Reply::ok(grant_body(TOKEN, &["mysql", "mysql-shared"])),
        ..FakeGuacamole::default()
    };
    let endpoint = spawn(fake).await;

    let grant = test_client()
        .login(&endpoint, USERNAME, PASSWORD)
        .await
        .unwrap();

    assert_eq!(grant.auth_token, TOKEN);
    assert_eq!(grant.username, USERNAME);
    assert_eq!(grant.data_source, "mysql");
    assert_eq!(grant.available_data_sources, vec!["mysql", "mysql-shared"]);
}

#[tokio::test]
async fn test_acquire_token_rejected_status() {
    let fake = FakeGuacamole {
        login: Reply::status(StatusCode::FORBIDDEN, "{}"),
        ..FakeGuacamole::default()
    };
    let endpoint = spawn(fake).await;

    let result = test_client()
        .acquire_token(&Credentials::new(
            endpoint.as_str(),
            USERNAME,
            "wrong",
            DATA_SOURCE,
        ))
        .await;

    assert!(matches!(
        result,
        Err(AuthError::Status(StatusCode::FORBIDDEN))
    ));
}

#[tokio::test]
async fn test_acquire_token_invalid_json() {
    let fake = FakeGuacamole {
        login: Reply::ok("{\"authToken\":"),
        ..FakeGuacamole::default()
    };
    let endpoint = spawn(fake).await;

    let result = test_client()
        .acquire_token(&test_credentials(&endpoint))
        .await;

    assert!(matches!(result, Err(AuthError::Decode(_))));
}

#[tokio::test]
async fn test_acquire_token_missing_token_field() {
    let fake = FakeGuacamole {
        login: Reply::ok(r#"{"username":"guacadmin"}"#),
        ..FakeGuacamole::default()
    };
    let endpoint = spawn(fake).await;

    let result = test_client()
        .acquire_token(&test_credentials(&endpoint))
        .await;

    assert!(matches!(result, Err(AuthError::EmptyToken)));
}

#[tokio::test]
async fn test_acquire_token_unreachable() {
    let result = test_client()
        .acquire_token(&test_credentials(&unreachable_endpoint()))
        .await;

    assert!(matches!(result, Err(AuthError::Request(_))));
}

#[tokio::test]
async fn test_release_token_sends_delete() {
    let fake = FakeGuacamole::default();
    let calls = fake.calls.clone();
    let endpoint = spawn(fake).await;

    test_client()
        .release_token(&endpoint, &AuthToken::new(TOKEN))
        .await;

    assert_eq!(calls.releases(), 1);
    assert_eq!(*calls.released_tokens.lock().unwrap(), vec![TOKEN.to_string()]);
}

#[tokio::test]
async fn test_release_token_encodes_token_in_path() {
    let fake = FakeGuacamole::default();
    let calls = fake.calls.clone();
    let endpoint = spawn(fake).await;

    test_client()
        .release_token(&endpoint, &AuthToken::new("a/b?c"))
        .await;

    assert_eq!(calls.releases(), 1);
    assert_eq!(*calls.released_tokens.lock().unwrap(), vec!["a/b?c".to_string()]);
}

#[tokio::test]
async fn test_release_token_swallows_failures() {
    // Neither call may panic or surface an error
    test_client()
        .release_token(&unreachable_endpoint(), &AuthToken::new(TOKEN))
        .await;

    let fake = FakeGuacamole {
        release: StatusCode::NOT_FOUND,
        ..FakeGuacamole::default()
    };
    let calls = fake.calls.clone();
    let endpoint = spawn(fake).await;
    test_client()
        .release_token(&endpoint, &AuthToken::new(TOKEN))
        .await;

    assert_eq!(calls.releases(), 1);
}

#[tokio::test]
async fn test_fetch_json_returns_raw_body() {
    let fake = FakeGuacamole {
        users: Reply::ok(r#"{"alice":{"username":"alice"}}"#),
        ..FakeGuacamole::default()
    };
    let endpoint = spawn(fake).await;
    let credentials = test_credentials(&endpoint);
    let url = credentials.api_url(&Resource::Users.path(&credentials.data_source));

    let body = test_client()
        .fetch_json(&AuthToken::new(TOKEN), &url)
        .await
        .unwrap();

    assert_eq!(body, br#"{"alice":{"username":"alice"}}"#.to_vec());
}

#[tokio::test]
async fn test_fetch_json_non_success_status() {
    let endpoint = spawn(FakeGuacamole::default()).await;
    let credentials = test_credentials(&endpoint);
    let url = credentials.api_url(&Resource::ActiveConnections.path(&credentials.data_source));

    let result = test_client()
        .fetch_json(&AuthToken::new("stale-token"), &url)
        .await;

    assert!(matches!(
        result,
        Err(FetchError::Status(StatusCode::FORBIDDEN))
    ));
}

#[tokio::test]
async fn test_fetch_errors_do_not_leak_token() {
    let credentials = test_credentials(&unreachable_endpoint());
    let url = credentials.api_url(&Resource::ConnectionHistory.path(&credentials.data_source));

    let err = test_client()
        .fetch_json(&AuthToken::new(TOKEN), &url)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Request(_)));
    assert!(!err.to_string().contains(TOKEN));
    assert!(!format!("{err:?}").contains(TOKEN));
}
