//! Tests for the auth module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::Session;
use crate::types::Credentials;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <form method="post" action="/Account/Login">
    <input name="Email" type="email">
    <input name="Password" type="password">
    <input name="__RequestVerificationToken" type="hidden" value="tok123">
  </form>
</body>
</html>"#;

const ANTIFORGERY: &str = "Reverso.Account.Antiforgery=af-cookie; Path=/; HttpOnly";

fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .base_url(format!("{}/", server.uri()))
        .login_url(format!("{}/Account/Login", server.uri()))
        .return_url(format!("{}/", server.uri()))
        .credentials(Credentials::new("me@example.com", "s3cret"))
        .build()
}

async fn mount_login_page(server: &MockServer, body: &str, set_cookie: bool) {
    let mut template = ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html");
    if set_cookie {
        template = template.insert_header("set-cookie", ANTIFORGERY);
    }
    Mock::given(method("GET"))
        .and(path("/Account/Login"))
        .and(query_param("lang", "en"))
        .respond_with(template)
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_home(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("home"))
        .mount(server)
        .await;
}

// ============================================================================
// Token extraction
// ============================================================================

#[test]
fn test_extract_verification_token() {
    let token = extract_verification_token(LOGIN_PAGE).unwrap().unwrap();
    assert_eq!(token.as_str(), "tok123");
}

#[test]
fn test_extract_verification_token_missing() {
    let html = r#"<html><body><input name="Email" type="email"></body></html>"#;
    assert!(extract_verification_token(html).unwrap().is_none());
}

#[test]
fn test_extract_verification_token_requires_hidden_type() {
    let html = r#"<input name="__RequestVerificationToken" type="text" value="visible">"#;
    assert!(extract_verification_token(html).unwrap().is_none());
}

#[test]
fn test_extract_verification_token_takes_first_match() {
    let html = r#"
        <input name="__RequestVerificationToken" type="hidden" value="first">
        <input name="__RequestVerificationToken" type="hidden" value="second">"#;
    let token = extract_verification_token(html).unwrap().unwrap();
    assert_eq!(token.as_str(), "first");
}

// ============================================================================
// Login flow
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;
    mount_login_page(&server, LOGIN_PAGE, true).await;
    mount_home(&server).await;

    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .and(query_param("returnUrl", format!("{}/", server.uri())))
        .and(body_string_contains("__RequestVerificationToken=tok123"))
        .and(body_string_contains("Email=me%40example.com"))
        .and(body_string_contains("RememberMe=true"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new(&test_config(&server)).unwrap();
    session.login().await.unwrap();
    assert!(session.is_logged_in().await);
}

#[tokio::test]
async fn test_login_twice_performs_one_handshake() {
    let server = MockServer::start().await;
    mount_login_page(&server, LOGIN_PAGE, true).await;
    mount_home(&server).await;

    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new(&test_config(&server)).unwrap();
    session.login().await.unwrap();
    session.login().await.unwrap();

    // token page + form post + redirect target
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_concurrent_logins_share_one_handshake() {
    let server = MockServer::start().await;
    mount_home(&server).await;

    // A slow token page keeps the first login in flight while the second waits
    Mock::given(method("GET"))
        .and(path("/Account/Login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", ANTIFORGERY)
                .set_body_raw(LOGIN_PAGE, "text/html")
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new(&test_config(&server)).unwrap();
    let (first, second) = futures::join!(session.login(), session.login());
    first.unwrap();
    second.unwrap();

    let posts = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 1);
    assert!(session.is_logged_in().await);
}

#[tokio::test]
async fn test_login_without_credentials_sends_nothing() {
    let server = MockServer::start().await;
    let mut config = test_config(&server);
    config.credentials = None;

    let session = Session::new(&config).unwrap();
    let err = session.login().await.unwrap_err();

    assert!(matches!(err, Error::MissingCredentials));
    assert!(err.is_config_error());
    assert!(!session.is_logged_in().await);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_token_missing_fails_before_post() {
    let server = MockServer::start().await;
    mount_login_page(&server, "<html><body>maintenance</body></html>", true).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = Session::new(&config).unwrap();
    let mut flow = LoginFlow::new(&session, &config.login);
    let err = flow
        .run(config.credentials.as_ref().unwrap())
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert!(err.to_string().contains("token not found"));
    assert_eq!(flow.state(), LoginState::Failed);
}

#[tokio::test]
async fn test_login_missing_antiforgery_cookie_fails_before_post() {
    let server = MockServer::start().await;
    mount_login_page(&server, LOGIN_PAGE, false).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = Session::new(&test_config(&server)).unwrap();
    let err = session.login().await.unwrap_err();

    assert!(err.is_auth_error());
    assert!(err.to_string().contains("missing antiforgery cookie"));
    assert!(!session.is_logged_in().await);
}

#[tokio::test]
async fn test_login_unexpected_final_url_fails() {
    let server = MockServer::start().await;
    mount_login_page(&server, LOGIN_PAGE, true).await;

    // Bad credentials: the service re-renders the login form with 200
    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(LOGIN_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server);
    let session = Session::new(&config).unwrap();
    let mut flow = LoginFlow::new(&session, &config.login);
    let err = flow
        .run(config.credentials.as_ref().unwrap())
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert!(err.to_string().contains("unexpected redirect"));
    assert_eq!(flow.state(), LoginState::Failed);
    assert!(!session.is_logged_in().await);
}

#[tokio::test]
async fn test_login_can_be_retried_after_failure() {
    let server = MockServer::start().await;
    mount_home(&server).await;

    // First attempt gets a page without a token, second a proper one
    Mock::given(method("GET"))
        .and(path("/Account/Login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Account/Login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", ANTIFORGERY)
                .set_body_raw(LOGIN_PAGE, "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = Session::new(&test_config(&server)).unwrap();
    assert!(session.login().await.unwrap_err().is_auth_error());
    assert!(!session.is_logged_in().await);

    session.login().await.unwrap();
    assert!(session.is_logged_in().await);
}

#[tokio::test]
async fn test_login_post_suppresses_ajax_headers() {
    let server = MockServer::start().await;
    mount_login_page(&server, LOGIN_PAGE, true).await;
    mount_home(&server).await;

    Mock::given(method("POST"))
        .and(path("/Account/Login"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/", server.uri())),
        )
        .mount(&server)
        .await;

    let session = Session::new(&test_config(&server)).unwrap();
    session.login().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let token_page = requests
        .iter()
        .find(|r| r.method.as_str() == "GET" && r.url.path() == "/Account/Login")
        .unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();

    assert!(token_page.headers.get("x-requested-with").is_some());
    assert!(post.headers.get("x-requested-with").is_none());
    assert_eq!(
        post.headers.get("sec-fetch-mode").unwrap().to_str().unwrap(),
        "navigate"
    );
    assert_eq!(
        post.headers.get("referer").unwrap().to_str().unwrap(),
        format!("{}/Account/Login", server.uri())
    );
    assert!(post
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/x-www-form-urlencoded"));
}
