//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping the router in an axum-test server
//! - A `send` helper speaking the message protocol
//! - Sample Quizlet pages in `fixtures`

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use quizwall_backend::config::Config;
use quizwall_backend::{router, AppState};
use quizwall_core::ExportStore;

/// Test context holding a server over a fresh in-memory state.
pub struct TestContext {
    pub state: AppState,
    pub server: TestServer,
}

impl TestContext {
    pub fn new() -> Self {
        Self::from_state(AppState::new(&Config::default()))
    }

    /// Context whose exports go to `store`.
    pub fn with_store(store: Arc<dyn ExportStore>) -> Self {
        Self::from_state(AppState::with_store(&Config::default(), store))
    }

    fn from_state(state: AppState) -> Self {
        let server = TestServer::new(router(state.clone())).expect("Failed to build test server");
        Self { state, server }
    }

    /// POST a message and return the decoded `{ success, data, error }` body.
    pub async fn send(&self, action: &str, payload: Option<Value>) -> Value {
        let body = match payload {
            Some(p) => json!({ "action": action, "payload": p }),
            None => json!({ "action": action }),
        };
        let response = self.server.post("/api/message").json(&body).await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    /// Send a message that must succeed and return its data.
    pub async fn send_ok(&self, action: &str, payload: Value) -> Value {
        let body = self.send(action, Some(payload)).await;
        assert_eq!(body["success"], true, "{} failed: {}", action, body);
        body["data"].clone()
    }

    /// Extract the sample animals page into `session_id`.
    pub async fn extract_animals(&self, session_id: &str) -> Value {
        self.send_ok(
            "extract-cards",
            json!({
                "sessionId": session_id,
                "url": fixtures::QUIZLET_URL,
                "html": fixtures::animals_page(),
            }),
        )
        .await
    }
}
