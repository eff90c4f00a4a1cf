//! Structured logging helpers
//!
//! Filter directive construction, request correlation IDs and privacy-safe
//! prompt previews for compose logs.

pub mod fields;
pub mod middleware;

pub use fields::prompt_preview;
pub use middleware::generate_request_id;

/// Build filter directives string from LoggingConfig
///
/// Produces `"<level>,herald::<component>=<level>,..."` so that individual
/// modules can be made noisier than the base level.
///
/// # Examples
///
/// ```
/// use herald::config::{LogFormat, LoggingConfig};
/// use herald::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("cascade".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     log_prompts: false,
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,herald::cascade=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",herald::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_base_level_only() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_directives_components_sorted() {
        let mut levels = HashMap::new();
        levels.insert("cascade".to_string(), "debug".to_string());
        levels.insert("backend".to_string(), "trace".to_string());

        let config = LoggingConfig {
            component_levels: Some(levels),
            ..Default::default()
        };

        assert_eq!(
            build_filter_directives(&config),
            "info,herald::backend=trace,herald::cascade=debug"
        );
    }
}
