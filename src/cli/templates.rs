//! Templates command handler

use crate::cli::output::{format_templates_json, format_templates_table, TemplateView};
use crate::cli::TemplatesArgs;
use crate::template::TemplateCatalog;

/// Handle `herald templates` command
pub fn handle_templates(args: &TemplatesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let catalog = TemplateCatalog::builtin();
    let views: Vec<TemplateView> = catalog.templates().iter().map(TemplateView::from).collect();

    if args.json {
        Ok(format_templates_json(&views)?)
    } else {
        Ok(format_templates_table(&views))
    }
}
