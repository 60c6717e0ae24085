
use fixtures::*;
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

#[actix_rt::test]
async fn project_without_category_reads_back_empty_list() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.create_project(&token, &json!({ "title": "Bare" })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["category"], json!([]));
    assert_eq!(created["githubLink"], "");
    assert_eq!(created["imageUrl"], "https://via.placeholder.com/400x250");

    let listed = app.list_projects().await;
    assert_eq!(listed[0]["category"], json!([]));
}

#[actix_rt::test]
async fn single_string_category_becomes_one_element_list() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.create_project(&token, &json!({ "title": "Solo", "category": "web" })).await;
    let created: Value = response.json().await.unwrap();

    let fetched: Value = app.client
        .get(app.url(&format!("/api/projects/{}", created["id"].as_str().unwrap())))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(fetched["category"], json!(["web"]));
}

#[actix_rt::test]
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    for title in ["first", "second", "third"] {
        let response = app.create_project(&token, &project_body(title)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let titles: Vec<String> = app.list_projects()
        .await
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[actix_rt::test]
async fn created_project_round_trips_through_list() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let body = project_body("Round trip");
    let created: Value = app.create_project(&token, &body).await.json().await.unwrap();

    assert!(created["id"].is_string());
    assert!(created["createdAt"].is_string());
    for field in ["title", "description", "imageUrl", "projectLink", "githubLink", "category"] {
        assert_eq!(created[field], body[field], "field {}", field);
    }

    let listed = app.list_projects().await;
    assert_eq!(listed, vec![created]);
}

#[actix_rt::test]
async fn category_query_filters_server_side() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    app.create_project(&token, &json!({ "title": "Site", "category": ["web"] })).await;
    app.create_project(&token, &json!({ "title": "Tool", "category": ["cli"] })).await;

    let filtered: Vec<Value> = app.client
        .get(app.url("/api/projects?category=cli"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let all: Vec<Value> = app.client
        .get(app.url("/api/projects?category=all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["title"], "Tool");
    assert_eq!(all.len(), 2);
}

#[actix_rt::test]
async fn update_replaces_fields_but_keeps_identity() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let created: Value = app.create_project(&token, &project_body("Before")).await.json().await.unwrap();
    let id = created["id"].as_str().unwrap();

    let response = app.client
        .put(app.url(&format!("/api/projects/{}", id)))
        .bearer_auth(&token)
        .json(&json!({ "title": "After" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["category"], json!([]));
}

#[actix_rt::test]
async fn update_of_unknown_project_is_404() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.client
        .put(app.url(&format!("/api/projects/{}", Uuid::new_v4())))
        .bearer_auth(&token)
        .json(&json!({ "title": "Ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["kind"], "not_found");
}

#[actix_rt::test]
async fn deleting_unknown_project_succeeds() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.client
        .delete(app.url(&format!("/api/projects/{}", Uuid::new_v4())))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[actix_rt::test]
async fn deleting_legacy_timestamp_id_succeeds() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.client
        .delete(app.url("/api/projects/1700000000000"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true }));
}

#[actix_rt::test]
async fn whitespace_only_title_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.create_project(&token, &json!({ "title": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["details"][0]["field"], "title");
    assert!(app.list_projects().await.is_empty());
}

#[actix_rt::test]
async fn delete_removes_project_from_list() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let created: Value = app.create_project(&token, &project_body("Doomed")).await.json().await.unwrap();

    app.client
        .delete(app.url(&format!("/api/projects/{}", created["id"].as_str().unwrap())))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    assert!(app.list_projects().await.is_empty());
}

#[actix_rt::test]
async fn malformed_id_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(app.url("/api/projects/not-a-uuid"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn invalid_project_lists_field_errors() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.create_project(&token, &json!({ "title": "", "projectLink": "not a url" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["kind"], "validation_error");
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"projectLink"));
}
