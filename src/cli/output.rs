//! Output formatting helpers for CLI commands

use crate::template::Template;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for template display
#[derive(Debug, Clone, serde::Serialize)]
pub struct TemplateView {
    pub id: String,
    pub name: String,
    pub keywords: Vec<String>,
    pub fallback: bool,
}

impl From<&Template> for TemplateView {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            keywords: template.keywords.clone(),
            fallback: template.is_fallback(),
        }
    }
}

/// Format templates as a table, in match order
pub fn format_templates_table(templates: &[TemplateView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "ID", "Name", "Keywords"]);

    for (i, t) in templates.iter().enumerate() {
        let keywords = if t.fallback {
            "(fallback)".to_string()
        } else {
            t.keywords.join(", ")
        };

        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&t.id),
            Cell::new(&t.name),
            Cell::new(keywords),
        ]);
    }

    table.to_string()
}

/// Format templates as JSON
pub fn format_templates_json(templates: &[TemplateView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "templates": templates }))
}
