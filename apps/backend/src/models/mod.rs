//! Message protocol and API types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use quizwall_core::{
    CardCollection, CardSource, ExportPayload, FlashcardPair, FlashcardSet, FormattedPayload,
};

// Re-export shared types from quizwall-core
pub use quizwall_core::{ExportReceipt, StoredExport, TemplateKind, TemplateMetadata};

// === Message envelope ===

/// `{ action, payload? }` sent by the popup, content script or import page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionMessage {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// `{ success, data?, error? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

// === Action payloads ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractCardsRequest {
    pub session_id: String,
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardsRequest {
    pub session_id: String,
    pub set: FlashcardSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCardRequest {
    pub session_id: String,
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveCardRequest {
    pub session_id: String,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCardRequest {
    pub session_id: String,
    pub index: usize,
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleReversedRequest {
    pub session_id: String,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSetRequest {
    pub session_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAllReversedRequest {
    pub session_id: String,
    pub reversed: bool,
}

/// Either a session to export from, or explicit cards and title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub template: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cards: Option<Vec<FlashcardPair>>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreExportRequest {
    pub session_key: String,
    pub data: ExportPayload,
    pub formatted: FormattedPayload,
    pub template_id: u32,
}

// === Responses ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResponse {
    pub service: String,
    pub version: String,
    pub session_id: String,
}

/// A session's cards as the popup shows them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionView {
    pub title: String,
    pub source: CardSource,
    /// Stored cards, reversal not applied.
    pub cards: Vec<FlashcardPair>,
    pub reversed_ids: Vec<String>,
    pub all_reversed: bool,
    /// What an export would contain right now.
    pub preview: Vec<FlashcardPair>,
}

impl From<&CardCollection> for CollectionView {
    fn from(collection: &CardCollection) -> Self {
        Self {
            title: collection.title().to_string(),
            source: collection.source(),
            cards: collection.cards().to_vec(),
            reversed_ids: collection
                .cards()
                .iter()
                .filter(|c| collection.is_reversed(&c.id))
                .map(|c| c.id.clone())
                .collect(),
            all_reversed: collection.all_reversed(),
            preview: collection.materialize(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateMetadata>,
}
