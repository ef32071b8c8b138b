//! Message endpoint
//!
//! One POST route carrying `{ action, payload? }`. Failures never surface as
//! HTTP errors here; they come back as `{ success: false, error }`.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use quizwall_core::{
    CardCollection, ExportStore, FlashcardService, Page, QuizletService, TemplateKind,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// POST /api/message
pub async fn handle(
    State(state): State<AppState>,
    Json(message): Json<ExtensionMessage>,
) -> Json<MessageResponse> {
    info!(action = %message.action, "received message");

    let response = match dispatch(&state, &message, Utc::now()) {
        Ok(data) => MessageResponse::ok(data),
        Err(err) => {
            warn!(action = %message.action, error = %err, "message failed");
            MessageResponse::failure(err.message())
        }
    };

    Json(response)
}

fn dispatch(state: &AppState, message: &ExtensionMessage, now: DateTime<Utc>) -> Result<Value> {
    match message.action.as_str() {
        "initialize" => initialize(message),
        "extract-cards" => extract_cards(state, payload(message)?, now),
        "get-cards" => {
            let request: SessionRequest = payload(message)?;
            let collection = state
                .sessions
                .get(&request.session_id, now)
                .ok_or_else(|| ApiError::NotFound("No cards found".to_string()))?;
            view(&collection)
        }
        "update-cards" => {
            let request: UpdateCardsRequest = payload(message)?;
            state
                .sessions
                .put(&request.session_id, CardCollection::from_set(request.set), now);
            Ok(json!({}))
        }
        "add-card" => {
            let request: AddCardRequest = payload(message)?;
            mutate(state, &request.session_id, now, |c| {
                c.add(request.term, request.definition);
                Ok(())
            })
        }
        "remove-card" => {
            let request: RemoveCardRequest = payload(message)?;
            mutate(state, &request.session_id, now, |c| {
                c.remove(request.index)?;
                Ok(())
            })
        }
        "edit-card" => {
            let request: EditCardRequest = payload(message)?;
            mutate(state, &request.session_id, now, |c| {
                Ok(c.edit(request.index, request.term, request.definition)?)
            })
        }
        "toggle-reversed" => {
            let request: ToggleReversedRequest = payload(message)?;
            mutate(state, &request.session_id, now, |c| {
                c.toggle_reversed(&request.id)?;
                Ok(())
            })
        }
        "rename-set" => {
            let request: RenameSetRequest = payload(message)?;
            if request.title.trim().is_empty() {
                return Err(ApiError::BadRequest("Missing title".to_string()));
            }
            mutate(state, &request.session_id, now, |c| {
                c.set_title(request.title);
                Ok(())
            })
        }
        "set-all-reversed" => {
            let request: SetAllReversedRequest = payload(message)?;
            mutate(state, &request.session_id, now, |c| {
                c.set_all_reversed(request.reversed);
                Ok(())
            })
        }
        "close-session" => {
            let request: SessionRequest = payload(message)?;
            let removed = state.sessions.remove(&request.session_id);
            Ok(json!({ "removed": removed }))
        }
        "export-wordwall" => export(state, payload(message)?, now),
        "store-export-data" => store_export_data(state, message),
        "get-export-data" => get_export_data(state, message),
        other => Err(ApiError::BadRequest(format!("Unknown action: {}", other))),
    }
}

fn payload<T: DeserializeOwned>(message: &ExtensionMessage) -> Result<T> {
    let value = message
        .payload
        .clone()
        .ok_or_else(|| ApiError::BadRequest(format!("Missing payload for {}", message.action)))?;
    Ok(serde_json::from_value(value)?)
}

fn view(collection: &CardCollection) -> Result<Value> {
    Ok(serde_json::to_value(CollectionView::from(collection))?)
}

fn mutate(
    state: &AppState,
    session_id: &str,
    now: DateTime<Utc>,
    f: impl FnOnce(&mut CardCollection) -> Result<()>,
) -> Result<Value> {
    state.sessions.update(session_id, now, |c| {
        f(c)?;
        view(c)
    })
}

fn initialize(message: &ExtensionMessage) -> Result<Value> {
    let request: Option<InitializeRequest> = message
        .payload
        .clone()
        .map(serde_json::from_value)
        .transpose()?;

    let session_id = request
        .and_then(|r| r.session_id)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(serde_json::to_value(InitializeResponse {
        service: "quizlet".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        session_id,
    })?)
}

fn extract_cards(
    state: &AppState,
    request: ExtractCardsRequest,
    now: DateTime<Utc>,
) -> Result<Value> {
    let service = QuizletService::new(Page::new(request.url, request.html));
    if !service.is_applicable() {
        return Err(ApiError::BadRequest("Not on Quizlet page".to_string()));
    }

    let set = service.extract_cards();
    info!(
        session_id = %request.session_id,
        service = service.service_id(),
        cards = set.cards.len(),
        "cards extracted"
    );

    let data = serde_json::to_value(&set)?;
    state
        .sessions
        .put(&request.session_id, CardCollection::from_set(set), now);
    Ok(data)
}

fn export(state: &AppState, request: ExportRequest, now: DateTime<Utc>) -> Result<Value> {
    let kind: TemplateKind = request.template.parse()?;

    let (cards, title) = match (request.session_id, request.cards) {
        (Some(session_id), _) => {
            let collection = state
                .sessions
                .get(&session_id, now)
                .ok_or_else(|| ApiError::NotFound("No cards found".to_string()))?;
            let set = collection.to_set();
            (set.cards, request.title.unwrap_or(set.title))
        }
        (None, Some(cards)) => {
            let title = request
                .title
                .ok_or_else(|| ApiError::BadRequest("Missing title".to_string()))?;
            (cards, title)
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Export needs a sessionId or cards".to_string(),
            ))
        }
    };

    let receipt = state
        .exporter()
        .export(&cards, &title, kind, &mut rand::thread_rng())?;
    Ok(serde_json::to_value(receipt)?)
}

fn store_export_data(state: &AppState, message: &ExtensionMessage) -> Result<Value> {
    let has_key = message
        .payload
        .as_ref()
        .and_then(|p| p.get("sessionKey"))
        .and_then(Value::as_str)
        .is_some_and(|k| !k.is_empty());
    if !has_key {
        return Err(ApiError::BadRequest("No sessionKey in payload".to_string()));
    }

    let request: StoreExportRequest = payload(message)?;
    state.exports.save(
        &request.session_key,
        StoredExport {
            data: request.data,
            formatted: request.formatted,
            template_id: request.template_id,
        },
    )?;
    info!(session_key = %request.session_key, "export data stored");
    Ok(json!({}))
}

fn get_export_data(state: &AppState, message: &ExtensionMessage) -> Result<Value> {
    let session_key = message
        .payload
        .as_ref()
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No sessionKey provided".to_string()))?;

    let stored = state
        .exporter()
        .fetch(session_key)?
        .ok_or_else(|| ApiError::NotFound("No data found in storage".to_string()))?;
    Ok(serde_json::to_value(stored.data)?)
}
