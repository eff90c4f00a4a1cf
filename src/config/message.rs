//! Message defaults configuration

use serde::{Deserialize, Serialize};

/// Defaults substituted for placeholders the caller leaves unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Value for `{appName}`.
    pub product_name: String,
    /// Value for `{ctaLink}`.
    pub cta_base_url: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            product_name: "Herald".to_string(),
            cta_base_url: "http://localhost:3000".to_string(),
        }
    }
}
