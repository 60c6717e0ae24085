
use fixtures::*;
use reqwest::{multipart, StatusCode};
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn text_file_is_rejected_before_storage() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.upload(&token, "notes.txt", "text/plain", b"hello".to_vec()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
}

#[actix_rt::test]
async fn renamed_non_image_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.upload(&token, "fake.png", "image/png", b"definitely not a png".to_vec()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
}

#[actix_rt::test]
async fn png_upload_returns_unique_servable_urls() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let mut urls = Vec::new();
    for _ in 0..2 {
        let response = app.upload(&token, "shot.png", "image/png", png_bytes(400, 250)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["url"], body["secure_url"]);
        assert!(body["fileName"].as_str().unwrap().ends_with(".png"));
        urls.push(body["url"].as_str().unwrap().to_string());
    }

    assert_ne!(urls[0], urls[1]);

    let served = app.client.get(app.url(&urls[0])).send().await.unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await.unwrap().to_vec(), png_bytes(400, 250));
}

/// A PNG header padded with zeros up to `len` bytes.
fn padded_png(len: usize) -> Vec<u8> {
    let mut bytes = png_bytes(400, 250);
    bytes.resize(len, 0);
    bytes
}

#[actix_rt::test]
async fn upload_far_over_the_limit_is_413() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.upload(&token, "huge.png", "image/png", padded_png(3 * 1024 * 1024)).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "payload_too_large");
    assert_eq!(body["message"], "File too large");
    assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
}

#[actix_rt::test]
async fn upload_just_over_the_limit_is_413() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let limit = app.config.upload_max_bytes;

    let response = app.upload(&token, "big.png", "image/png", padded_png(limit + 100)).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        format!("File size exceeds the maximum of {} bytes.", limit)
    );
    assert_eq!(std::fs::read_dir(&app.upload_dir).unwrap().count(), 0);
}

#[actix_rt::test]
async fn missing_image_field_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let form = multipart::Form::new().text("caption", "no file here");
    let response = app.client
        .post(app.url("/api/upload-image"))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["message"], "No file uploaded");
}

#[actix_rt::test]
async fn upload_requires_admin() {
    let app = TestApp::spawn().await;

    let part = multipart::Part::bytes(png_bytes(1, 1)).file_name("a.png");
    let response = app.client
        .post(app.url("/api/upload-image"))
        .multipart(multipart::Form::new().part("image", part))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
