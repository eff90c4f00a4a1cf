//! Placeholder substitution for message patterns.
//!
//! Recognized placeholders are `{user}`, `{appName}` and `{ctaLink}`. Any other
//! `{token}` is left exactly as written.

use serde::{Deserialize, Serialize};

/// Fallback greeting name when the caller does not supply one.
pub const DEFAULT_USER: &str = "there";

/// Caller-supplied values for message placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
}

/// Values used for any placeholder the caller left unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefaults {
    pub user: String,
    pub app_name: String,
    pub cta_link: String,
}

impl VariableDefaults {
    pub fn new(app_name: impl Into<String>, cta_link: impl Into<String>) -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
            app_name: app_name.into(),
            cta_link: cta_link.into(),
        }
    }
}

impl From<&crate::config::MessageConfig> for VariableDefaults {
    fn from(config: &crate::config::MessageConfig) -> Self {
        Self::new(config.product_name.clone(), config.cta_base_url.clone())
    }
}

/// Replace every recognized placeholder in `pattern`.
///
/// Blank caller values count as missing, so `{user}` never renders as an
/// empty greeting.
pub fn substitute(
    pattern: &str,
    variables: &MessageVariables,
    defaults: &VariableDefaults,
) -> String {
    let pick = |value: &Option<String>, fallback: &str| -> String {
        match value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => fallback.to_string(),
        }
    };

    let replacements = [
        ("{user}", pick(&variables.user, &defaults.user)),
        ("{appName}", pick(&variables.app_name, &defaults.app_name)),
        ("{ctaLink}", pick(&variables.cta_link, &defaults.cta_link)),
    ];

    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    // Single left-to-right pass: substituted text is never rescanned, so a
    // value containing "{user}" stays literal.
    'scan: while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];
        for (token, value) in &replacements {
            if candidate.starts_with(token) {
                out.push_str(value);
                rest = &candidate[token.len()..];
                continue 'scan;
            }
        }
        out.push('{');
        rest = &candidate[1..];
    }
    out.push_str(rest);

    out
}
