//! Export flow: templates, export-wordwall, stored export retrieval.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::fixtures;
use common::TestContext;
use quizwall_core::{ExportStore, StorageError, StoredExport};

#[tokio::test]
async fn test_list_templates_in_registry_order() {
    let ctx = TestContext::new();
    let response = ctx.server.get("/api/templates").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let templates: Vec<(String, u64)> = body["templates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["type"].as_str().unwrap().to_string(), t["templateId"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        templates,
        vec![
            ("quiz".to_string(), 5),
            ("find-match".to_string(), 46),
            ("match-up".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn test_export_match_up_from_cards() {
    let ctx = TestContext::new();
    let receipt = ctx
        .send_ok(
            "export-wordwall",
            json!({
                "template": "match-up",
                "title": "Animals",
                "cards": fixtures::cards(&[("cat", "gato"), ("dog", "perro")]),
            }),
        )
        .await;

    assert_eq!(receipt["templateId"], 3);
    let key = receipt["sessionKey"].as_str().unwrap();
    assert!(key.starts_with("wordwall_export_"));
    assert_eq!(
        receipt["url"],
        format!(
            "https://wordwall.net/create/entercontent?templateId=3&folderId=0&sessionKey={}",
            key
        )
    );

    let response = ctx.server.get(&format!("/api/exports/{}", key)).await;
    response.assert_status_ok();
    let stored: Value = response.json();
    assert_eq!(stored["templateId"], 3);
    assert_eq!(stored["data"]["template"], "match-up");

    let formatted = &stored["formatted"];
    assert_eq!(formatted["title"], "Animals");
    assert_eq!(formatted["left"], json!(["cat", "dog"]));
    let originals = ["gato", "perro"];
    let right = formatted["right"].as_array().unwrap();
    let mapping = formatted["indexMapping"].as_array().unwrap();
    assert_eq!(right.len(), 2);
    for (k, origin) in mapping.iter().enumerate() {
        assert_eq!(right[k], originals[origin.as_u64().unwrap() as usize]);
    }
}

#[tokio::test]
async fn test_export_from_session_applies_reversal() {
    let ctx = TestContext::new();
    ctx.extract_animals("tab-1").await;
    ctx.send_ok("set-all-reversed", json!({ "sessionId": "tab-1", "reversed": true }))
        .await;

    let receipt = ctx
        .send_ok("export-wordwall", json!({ "template": "find-match", "sessionId": "tab-1" }))
        .await;
    assert_eq!(receipt["templateId"], 46);

    let data = ctx
        .send_ok("get-export-data", receipt["sessionKey"].clone())
        .await;
    assert_eq!(data["title"], "Spanish Animals");
    assert_eq!(data["cards"][0], json!({ "id": "0", "term": "gato", "definition": "cat" }));

    let stored = ctx
        .state
        .exports
        .load(receipt["sessionKey"].as_str().unwrap())
        .unwrap()
        .unwrap();
    let formatted = serde_json::to_value(&stored.formatted).unwrap();
    assert_eq!(formatted["items"][0], json!({ "keyword": "gato", "definition": "cat" }));
}

#[tokio::test]
async fn test_export_from_session_uses_renamed_title() {
    let ctx = TestContext::new();
    ctx.extract_animals("tab-1").await;
    ctx.send_ok("rename-set", json!({ "sessionId": "tab-1", "title": "Zoo" }))
        .await;

    let receipt = ctx
        .send_ok("export-wordwall", json!({ "template": "match-up", "sessionId": "tab-1" }))
        .await;
    let data = ctx
        .send_ok("get-export-data", receipt["sessionKey"].clone())
        .await;
    assert_eq!(data["title"], "Zoo");
    assert_eq!(data["template"], "match-up");

    let receipt = ctx
        .send_ok(
            "export-wordwall",
            json!({ "template": "quiz", "sessionId": "tab-1", "title": "Override" }),
        )
        .await;
    let data = ctx
        .send_ok("get-export-data", receipt["sessionKey"].clone())
        .await;
    assert_eq!(data["title"], "Override");
}

#[tokio::test]
async fn test_export_quiz_answers() {
    let ctx = TestContext::new();
    ctx.extract_animals("tab-1").await;
    let receipt = ctx
        .send_ok("export-wordwall", json!({ "template": "quiz", "sessionId": "tab-1" }))
        .await;

    let stored: Value = ctx
        .server
        .get(&format!("/api/exports/{}", receipt["sessionKey"].as_str().unwrap()))
        .await
        .json();
    let questions = stored["formatted"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);
    for q in questions {
        let answers = q["answers"].as_array().unwrap();
        assert_eq!(answers.len(), 4);
        assert_eq!(answers.iter().filter(|a| a["correct"] == true).count(), 1);
    }
}

#[tokio::test]
async fn test_export_unknown_template_fails() {
    let ctx = TestContext::new();
    let body = ctx
        .send(
            "export-wordwall",
            Some(json!({ "template": "crossword", "title": "x", "cards": [] })),
        )
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "unknown template: crossword");
}

#[tokio::test]
async fn test_export_without_source_fails() {
    let ctx = TestContext::new();
    let body = ctx
        .send("export-wordwall", Some(json!({ "template": "quiz" })))
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Export needs a sessionId or cards");
}

#[tokio::test]
async fn test_store_and_get_export_data() {
    let ctx = TestContext::new();
    let payload = json!({
        "sessionKey": "wordwall_export_123",
        "templateId": 46,
        "data": {
            "title": "Colors",
            "template": "find-match",
            "cards": fixtures::cards(&[("red", "rojo")]),
            "createdAt": "2026-10-17T10:00:00Z"
        },
        "formatted": {
            "title": "Colors",
            "items": [{ "keyword": "red", "definition": "rojo" }]
        }
    });
    ctx.send_ok("store-export-data", payload).await;

    let data = ctx.send_ok("get-export-data", json!("wordwall_export_123")).await;
    assert_eq!(data["title"], "Colors");
    assert_eq!(data["cards"][0]["term"], "red");
}

#[tokio::test]
async fn test_store_export_data_requires_key() {
    let ctx = TestContext::new();
    let body = ctx
        .send("store-export-data", Some(json!({ "templateId": 3 })))
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No sessionKey in payload");
}

#[tokio::test]
async fn test_get_export_data_misses() {
    let ctx = TestContext::new();
    let body = ctx.send("get-export-data", None).await;
    assert_eq!(body["error"], "No sessionKey provided");

    let body = ctx
        .send("get-export-data", Some(json!("wordwall_export_404")))
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No data found in storage");
}

#[tokio::test]
async fn test_get_export_not_found() {
    let ctx = TestContext::new();
    let response = ctx.server.get("/api/exports/wordwall_export_1").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

struct RejectingStore;

impl ExportStore for RejectingStore {
    fn save(&self, _key: &str, _export: StoredExport) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }

    fn load(&self, _key: &str) -> Result<Option<StoredExport>, StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }
}

#[tokio::test]
async fn test_storage_failure_is_reported() {
    let ctx = TestContext::with_store(Arc::new(RejectingStore));
    let body = ctx
        .send(
            "export-wordwall",
            Some(json!({
                "template": "quiz",
                "title": "x",
                "cards": fixtures::cards(&[("a", "b")]),
            })),
        )
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "storage failure: store unavailable: disk full");

    let body = ctx
        .send("get-export-data", Some(json!("wordwall_export_1")))
        .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "storage failure: store unavailable: disk full");

    let response = ctx.server.get("/api/exports/wordwall_export_1").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
