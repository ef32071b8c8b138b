//! Card extraction from Quizlet set pages.
//!
//! Extraction runs a cascade of strategies against the parsed page. Each
//! strategy is tried only when every earlier one found nothing, so a page
//! that matches the primary layout never touches the fallbacks.
//!
//! Nothing here fails: a selector that does not parse or a layout that does
//! not match yields zero pairs and the cascade moves on. A page with no
//! recognizable cards produces an empty [`FlashcardSet`].

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::normalize::normalize;
use crate::types::{CardSource, FlashcardPair, FlashcardSet};

/// Title used when no heading can be found.
pub const DEFAULT_TITLE: &str = "Untitled Set";

/// Texts at or above this many characters are ignored by the generic strategy.
pub const GENERIC_MAX_TEXT_LEN: usize = 300;

const TITLE_SELECTORS: &[&str] = &[
    "[data-test=\"set-header\"] h1",
    ".SetPageHeaderCard h1",
    "[class*=\"setTitle\"]",
    ".StudySet__title",
];

const QUIZLET_HOSTS: &[&str] = &["quizlet.com", "www.quizlet.com"];

/// A fetched page: where it came from and its markup.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Scraping service contract.
pub trait FlashcardService {
    /// Extract the set on the current page. May be empty.
    fn extract_cards(&self) -> FlashcardSet;

    /// Whether this service understands the current page.
    fn is_applicable(&self) -> bool;

    /// Service identifier.
    fn service_id(&self) -> &'static str;
}

/// One way of finding (term, definition) texts in a page.
pub trait ExtractionStrategy: Send + Sync {
    /// Strategy identifier, used in logs.
    fn name(&self) -> &'static str;

    /// Normalized (term, definition) pairs in document order.
    fn extract(&self, doc: &Html) -> Vec<(String, String)>;
}

/// Containers holding at least two text nodes; first is the term, second the
/// definition.
pub struct ContainerStrategy {
    name: &'static str,
    container: &'static str,
    text: &'static str,
}

impl ContainerStrategy {
    pub fn new(name: &'static str, container: &'static str, text: &'static str) -> Self {
        Self {
            name,
            container,
            text,
        }
    }

    /// `SetPageTermsList-term` rows, the regular set page layout.
    pub fn terms_list() -> Self {
        Self::new(
            "terms-list",
            "div[class*='SetPageTermsList-term']",
            "span.TermText",
        )
    }

    /// `role="option"` rows used by some alternate layouts.
    pub fn option_role() -> Self {
        Self::new("option-role", "div[role=\"option\"]", "span.TermText")
    }
}

impl ExtractionStrategy for ContainerStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, doc: &Html) -> Vec<(String, String)> {
        let (Some(container_sel), Some(text_sel)) = (selector(self.container), selector(self.text))
        else {
            return Vec::new();
        };

        let containers: Vec<ElementRef<'_>> = doc.select(&container_sel).collect();
        debug!(strategy = self.name, containers = containers.len(), "matched containers");

        containers
            .into_iter()
            .filter_map(|container| {
                let mut texts = container.select(&text_sel).map(element_text);
                let term = texts.next()?;
                let definition = texts.next()?;
                if term.is_empty() || definition.is_empty() {
                    return None;
                }
                Some((term, definition))
            })
            .collect()
    }
}

/// Loosely matched containers; takes the first and last distinct descendant
/// text. Works when a container holds exactly a term and a definition and
/// degrades with surrounding noise.
pub struct GenericStrategy {
    container: &'static str,
    descendants: &'static str,
    max_len: usize,
}

impl Default for GenericStrategy {
    fn default() -> Self {
        Self {
            container: "div[class*='term'], li[class*='card']",
            descendants: "span, div, p",
            max_len: GENERIC_MAX_TEXT_LEN,
        }
    }
}

impl ExtractionStrategy for GenericStrategy {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, doc: &Html) -> Vec<(String, String)> {
        let (Some(container_sel), Some(desc_sel)) =
            (selector(self.container), selector(self.descendants))
        else {
            return Vec::new();
        };

        let mut pairs = Vec::new();
        for container in doc.select(&container_sel) {
            let mut seen = HashSet::new();
            let texts: Vec<String> = container
                .select(&desc_sel)
                .map(element_text)
                .filter(|t| !t.is_empty() && t.chars().count() < self.max_len)
                .filter(|t| seen.insert(t.clone()))
                .collect();

            if let [first, .., last] = texts.as_slice() {
                pairs.push((first.clone(), last.clone()));
            }
        }
        pairs
    }
}

/// Ordered cascade of strategies.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run strategies in order, stopping at the first that yields pairs.
    ///
    /// Ids are assigned `"0"`, `"1"`, ... per call.
    pub fn extract_pairs(&self, doc: &Html) -> Vec<FlashcardPair> {
        for strategy in &self.strategies {
            let found = strategy.extract(doc);
            info!(strategy = strategy.name(), pairs = found.len(), "extraction strategy finished");
            if !found.is_empty() {
                return found
                    .into_iter()
                    .enumerate()
                    .map(|(id, (term, definition))| FlashcardPair {
                        id: id.to_string(),
                        term,
                        definition,
                    })
                    .collect();
            }
        }
        Vec::new()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ContainerStrategy::terms_list()),
            Box::new(ContainerStrategy::option_role()),
            Box::new(GenericStrategy::default()),
        ])
    }
}

/// First non-empty heading among the candidate selectors, tried in order.
pub fn extract_title(doc: &Html) -> String {
    TITLE_SELECTORS
        .iter()
        .filter_map(|css| selector(css))
        .find_map(|sel| {
            doc.select(&sel)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

/// Quizlet implementation of [`FlashcardService`].
pub struct QuizletService {
    page: Page,
    extractor: Extractor,
}

impl QuizletService {
    pub fn new(page: Page) -> Self {
        Self::with_extractor(page, Extractor::default())
    }

    pub fn with_extractor(page: Page, extractor: Extractor) -> Self {
        Self { page, extractor }
    }
}

impl FlashcardService for QuizletService {
    fn extract_cards(&self) -> FlashcardSet {
        let doc = Html::parse_document(&self.page.html);
        let title = extract_title(&doc);
        let cards = self.extractor.extract_pairs(&doc);
        info!(title = %title, cards = cards.len(), "extracted set");

        FlashcardSet {
            title,
            source: CardSource::Quizlet,
            cards,
        }
    }

    fn is_applicable(&self) -> bool {
        Url::parse(&self.page.url)
            .ok()
            .and_then(|url| url.host_str().map(|h| QUIZLET_HOSTS.contains(&h)))
            .unwrap_or(false)
    }

    fn service_id(&self) -> &'static str {
        "quizlet"
    }
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            warn!(selector = css, error = ?err, "invalid selector, skipping");
            None
        }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}
