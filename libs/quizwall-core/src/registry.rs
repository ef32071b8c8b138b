//! Lookup table from template kind to formatter.
//!
//! Built once at start-up and passed by reference to whoever formats.

use tracing::error;

use crate::error::{CoreError, Result};
use crate::templates::{ExportTemplate, FindMatchTemplate, MatchUpTemplate, QuizTemplate};
use crate::types::{TemplateKind, TemplateMetadata};

pub struct TemplateRegistry {
    templates: Vec<Box<dyn ExportTemplate>>,
}

impl TemplateRegistry {
    /// Registry holding exactly the given templates, in the given order.
    pub fn with_templates(templates: Vec<Box<dyn ExportTemplate>>) -> Self {
        Self { templates }
    }

    /// Formatter for `kind`.
    pub fn get(&self, kind: TemplateKind) -> Result<&dyn ExportTemplate> {
        self.templates
            .iter()
            .find(|t| t.metadata().kind == kind)
            .map(|t| t.as_ref())
            .ok_or_else(|| {
                error!(template = %kind, "template not registered");
                CoreError::UnknownTemplate(kind.to_string())
            })
    }

    /// Metadata of every template, in registration order.
    pub fn all_metadata(&self) -> Vec<&TemplateMetadata> {
        self.templates.iter().map(|t| t.metadata()).collect()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_templates(vec![
            Box::new(QuizTemplate::default()),
            Box::new(FindMatchTemplate::default()),
            Box::new(MatchUpTemplate::default()),
        ])
    }
}
