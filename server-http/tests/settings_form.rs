mod common;

use axum::http::StatusCode;
use common::{get, post_form, send, send_raw, test_app};
use serde_json::json;

const SETTINGS: &str = "/admin/config/news-api";

#[tokio::test]
async fn test_form_page_renders() {
    let app = test_app().await;

    let (status, headers, body) = send_raw(&app.router, get(SETTINGS)).await;
    let page = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/html"));
    assert!(page.contains("name=\"secret_key\""));
    assert!(page.contains("id=\"submitted\""));
}

#[tokio::test]
async fn test_submitted_key_reaches_news_header() {
    let app = test_app().await;

    let (status, _, body) = send(&app.router, post_form(SETTINGS, "secret_key=abc123")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "command": "insert",
            "method": "html",
            "selector": "#submitted",
            "data": "Thanks! For Submitting The Form."
        }])
    );

    let (_, headers, _) = send(&app.router, get("/expose_api/news_resource?tags=space")).await;
    assert_eq!(headers["secret_key"], "abc123");
    let first_etag = headers["etag"].clone();

    send(&app.router, post_form(SETTINGS, "secret_key=rotated")).await;
    let (_, headers, _) = send(&app.router, get("/expose_api/news_resource?tags=space")).await;
    assert_eq!(headers["secret_key"], "rotated");
    assert_ne!(headers["etag"], first_etag);

    let (_, _, page) = send_raw(&app.router, get(SETTINGS)).await;
    assert!(String::from_utf8(page).unwrap().contains("value=\"rotated\""));
}

#[tokio::test]
async fn test_blank_key_is_rejected() {
    let app = test_app().await;

    for form in ["secret_key=", "secret_key=%20%20", ""] {
        let (status, _, body) = send(&app.router, post_form(SETTINGS, form)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{:?}", form);
        assert_eq!(
            body,
            json!({"error": "Secret Key field is required.", "field": "secret_key"})
        );
    }

    let (_, headers, _) = send(&app.router, get("/expose_api/news_resource?tags=space")).await;
    assert_eq!(headers["secret_key"], "");
}

#[tokio::test]
async fn test_later_submission_wins() {
    let app = test_app().await;

    send(&app.router, post_form(SETTINGS, "secret_key=first")).await;
    send(&app.router, post_form(SETTINGS, "secret_key=second")).await;

    let (_, headers, _) = send(&app.router, get("/expose_api/news_resource?tags=space")).await;
    assert_eq!(headers["secret_key"], "second");
}

#[tokio::test]
async fn test_key_is_stored_as_entered() {
    let app = test_app().await;

    let (status, _, _) = send(&app.router, post_form(SETTINGS, "secret_key=%20k%C3%A9y%20")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, headers, _) = send(&app.router, get("/expose_api/news_resource?tags=space")).await;
    assert_eq!(headers["secret_key"].as_bytes(), " k\u{e9}y ".as_bytes());
}

#[tokio::test]
async fn test_control_characters_are_rejected() {
    let app = test_app().await;
    send(&app.router, post_form(SETTINGS, "secret_key=keep")).await;

    let (status, _, body) = send(&app.router, post_form(SETTINGS, "secret_key=a%0Ab")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({
            "error": "Secret Key must not contain control characters.",
            "field": "secret_key"
        })
    );

    let (_, headers, _) = send(&app.router, get("/expose_api/news_resource?tags=space")).await;
    assert_eq!(headers["secret_key"], "keep");
}
