//! Core types shared by the extractor, the formatters and the backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One term/definition unit.
///
/// `id` is unique within its collection and stays the same across edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardPair {
    pub id: String,
    pub term: String,
    pub definition: String,
}

impl FlashcardPair {
    pub fn new(
        id: impl Into<String>,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            definition: definition.into(),
        }
    }

    /// The same card with term and definition swapped.
    pub fn reversed(&self) -> Self {
        Self {
            id: self.id.clone(),
            term: self.definition.clone(),
            definition: self.term.clone(),
        }
    }
}

/// Where a set was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    Quizlet,
    Other,
}

impl Default for CardSource {
    fn default() -> Self {
        Self::Other
    }
}

/// Ordered, titled collection of pairs from one extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub title: String,
    pub source: CardSource,
    pub cards: Vec<FlashcardPair>,
}

impl FlashcardSet {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Target quiz template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    Quiz,
    FindMatch,
    MatchUp,
}

impl TemplateKind {
    /// All kinds, in registry order.
    pub const ALL: [TemplateKind; 3] = [Self::Quiz, Self::FindMatch, Self::MatchUp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::FindMatch => "find-match",
            Self::MatchUp => "match-up",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiz" => Ok(Self::Quiz),
            "find-match" => Ok(Self::FindMatch),
            "match-up" => Ok(Self::MatchUp),
            other => Err(CoreError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Static description of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    #[serde(rename = "type")]
    pub kind: TemplateKind,
    /// Numeric template id understood by the import site.
    pub template_id: u32,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Template-agnostic export record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub title: String,
    pub template: TemplateKind,
    pub cards: Vec<FlashcardPair>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub text: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub text: String,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPayload {
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    pub keyword: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindMatchPayload {
    pub title: String,
    pub items: Vec<MatchingPair>,
}

/// Two columns; `right[k]` came from `left[index_mapping[k]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpPayload {
    pub title: String,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub index_mapping: Vec<usize>,
}

/// Template-shaped payload handed to the form filler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattedPayload {
    Quiz(QuizPayload),
    FindMatch(FindMatchPayload),
    MatchUp(MatchUpPayload),
}

impl FormattedPayload {
    pub fn title(&self) -> &str {
        match self {
            Self::Quiz(p) => &p.title,
            Self::FindMatch(p) => &p.title,
            Self::MatchUp(p) => &p.title,
        }
    }

    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::Quiz(_) => TemplateKind::Quiz,
            Self::FindMatch(_) => TemplateKind::FindMatch,
            Self::MatchUp(_) => TemplateKind::MatchUp,
        }
    }
}

/// What the export store keeps under one session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredExport {
    pub data: ExportPayload,
    pub formatted: FormattedPayload,
    pub template_id: u32,
}
