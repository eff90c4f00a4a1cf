//! Compose command implementation

use crate::cascade::{Composer, GenerationRequest};
use crate::cli::ComposeArgs;
use crate::config::HeraldConfig;
use crate::template::MessageVariables;
use std::sync::Arc;

/// Load configuration for a one-off compose: file if present, then env.
pub fn load_compose_config(args: &ComposeArgs) -> Result<HeraldConfig, Box<dyn std::error::Error>> {
    let config = if args.config.exists() {
        HeraldConfig::load(Some(&args.config))?
    } else {
        HeraldConfig::default()
    };

    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Build the request from CLI arguments.
pub fn build_request(args: &ComposeArgs) -> GenerationRequest {
    GenerationRequest::new(args.prompt.clone()).with_variables(MessageVariables {
        user: args.user.clone(),
        app_name: args.app_name.clone(),
        cta_link: args.cta_link.clone(),
    })
}

/// Handle `herald compose` command, returning pretty JSON
pub async fn handle_compose(args: &ComposeArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_compose_config(args)?;
    let client = reqwest::Client::builder().build()?;
    let composer = Composer::from_config(&config, Arc::new(client));

    let message = composer.compose(&build_request(args)).await?;
    Ok(serde_json::to_string_pretty(&message)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(prompt: &str) -> ComposeArgs {
        ComposeArgs {
            prompt: prompt.to_string(),
            user: Some("Ada".to_string()),
            app_name: None,
            cta_link: None,
            config: PathBuf::from("nonexistent-herald.toml"),
        }
    }

    #[test]
    fn test_build_request_carries_variables() {
        let request = build_request(&args("write a welcome email"));
        assert_eq!(request.prompt, "write a welcome email");
        assert_eq!(request.variables.user.as_deref(), Some("Ada"));
        assert!(request.variables.app_name.is_none());
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = load_compose_config(&args("write a welcome email")).unwrap();
        assert_eq!(config.generation.min_prompt_chars, 5);
    }

    #[test]
    fn test_invalid_config_file_rejected() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[generation]\nmin_prompt_chars = 0").unwrap();

        let mut args = args("write a welcome email");
        args.config = temp.path().to_path_buf();

        assert!(load_compose_config(&args).is_err());
    }
}
