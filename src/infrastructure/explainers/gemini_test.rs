use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::candidates_fixture;
use test_utils::provider_error_fixture;

use super::Gemini;
use crate::domain::models::Credential;
use crate::domain::models::ExplainError;
use crate::domain::models::ExplainPrompt;
use crate::domain::models::Explainer;

const PATH: &str = "/v1beta/models/model-1:generateContent?key=abc";

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini::new(&url, "model-1");
    }
}

fn credential() -> Credential {
    return Credential::parse("abc").unwrap();
}

#[tokio::test]
async fn it_gets_explanations() -> Result<()> {
    let prompt = ExplainPrompt::new("Black holes");

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "contents": [{ "parts": [{ "text": prompt.text }] }]
        })))
        .with_status(200)
        .with_body(candidates_fixture("A place where gravity wins."))
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend.explain(&prompt, &credential()).await?;
    mock.assert();

    assert_eq!(res, Some("A place where gravity wins.".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_returns_nothing_without_candidates() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await?;
    mock.assert();

    assert_eq!(res, None);

    return Ok(());
}

#[tokio::test]
async fn it_returns_nothing_for_empty_text() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(candidates_fixture(""))
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await?;
    mock.assert();

    assert_eq!(res, None);

    return Ok(());
}

#[tokio::test]
async fn it_flags_bad_credentials() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(400)
        .with_body(provider_error_fixture(400, "API key not valid."))
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await;
    mock.assert();

    assert!(matches!(
        res,
        Err(ExplainError::InvalidCredential { status: 400 })
    ));
}

#[tokio::test]
async fn it_surfaces_provider_messages() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(500)
        .with_body(provider_error_fixture(500, "The model is overloaded."))
        .create();

    let backend = Gemini::with_url(server.url());
    let err = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await
        .unwrap_err();
    mock.assert();

    assert_eq!(
        err.to_string(),
        "API Error: 500 Internal Server Error - The model is overloaded."
    );
}

#[tokio::test]
async fn it_falls_back_to_the_status_code() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(503)
        .with_body("<html>upstream unavailable</html>")
        .create();

    let backend = Gemini::with_url(server.url());
    let err = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await
        .unwrap_err();
    mock.assert();

    assert_eq!(err.to_string(), "API Error: 503 Service Unavailable");
}

#[tokio::test]
async fn it_fails_on_non_json_success_bodies() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("not json")
        .create();

    let backend = Gemini::with_url(server.url());
    let res = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await;
    mock.assert();

    assert!(matches!(res, Err(ExplainError::Decode(_))));
}

#[tokio::test]
async fn it_fails_when_unreachable() {
    let backend = Gemini::with_url("http://127.0.0.1:1".to_string());
    let res = backend
        .explain(&ExplainPrompt::new("Black holes"), &credential())
        .await;

    assert!(matches!(res, Err(ExplainError::Transport(_))));
}

#[tokio::test]
async fn it_keeps_the_key_out_of_transport_errors() -> Result<()> {
    let backend = Gemini::with_url("http://127.0.0.1:1".to_string());
    let err = backend
        .explain(
            &ExplainPrompt::new("Black holes"),
            &Credential::parse("SECRETKEY123456")?,
        )
        .await
        .unwrap_err();

    assert!(!err.to_string().contains("SECRETKEY123456"));
    assert!(!err.user_message().contains("SECRETKEY123456"));
    assert!(!format!("{err:?}").contains("SECRETKEY123456"));

    return Ok(());
}

#[tokio::test]
async fn it_returns_nothing_for_unexpected_shapes() -> Result<()> {
    let bodies = vec![
        r#"{"candidates": null}"#,
        r#"{"candidates": [null]}"#,
        r#"{"candidates": [{"content": null}]}"#,
        r#"{"candidates": [{"content": {"parts": null}}]}"#,
        r#"{"candidates": [{"content": {"parts": [null]}}]}"#,
        r#"{"candidates": [{"content": {"parts": [{"text": null}]}}]}"#,
        r#"{"candidates": [{"content": {"parts": [{"text": 42}]}}]}"#,
        r#"{"candidates": {}}"#,
        r#"[]"#,
        r#"null"#,
        r#""just a string""#,
    ];

    for body in bodies {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(body)
            .create();

        let backend = Gemini::with_url(server.url());
        let res = backend
            .explain(&ExplainPrompt::new("Black holes"), &credential())
            .await?;
        mock.assert();

        assert_eq!(res, None, "body: {body}");
    }

    return Ok(());
}
