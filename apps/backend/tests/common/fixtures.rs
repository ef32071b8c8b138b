//! Test fixtures: sample pages and card lists.

use serde_json::{json, Value};

pub const QUIZLET_URL: &str = "https://quizlet.com/123456/spanish-animals-flash-cards/";

/// Set page in the regular terms-list layout.
pub fn animals_page() -> String {
    terms_list_page(
        "Spanish Animals",
        &[("cat", "gato"), ("dog", "perro"), ("bird", "pájaro"), ("fish", "pez")],
    )
}

/// Build a terms-list set page with the given title and pairs.
pub fn terms_list_page(title: &str, pairs: &[(&str, &str)]) -> String {
    let rows = pairs
        .iter()
        .map(|(term, definition)| {
            format!(
                r#"<div class="SetPageTermsList-term">
                    <span class="TermText notranslate">{}</span>
                    <span class="TermText notranslate">{}</span>
                </div>"#,
                term, definition
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<html><body>
            <div data-test="set-header"><h1>{}</h1></div>
            <section>{}</section>
        </body></html>"#,
        title, rows
    )
}

/// Cards in wire form.
pub fn cards(pairs: &[(&str, &str)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .enumerate()
            .map(|(i, (term, definition))| {
                json!({ "id": i.to_string(), "term": term, "definition": definition })
            })
            .collect(),
    )
}
