//! Configuration loading
//!
//! Completion-service settings come from the environment through figment.
//! Per-run settings (model, instruction) come from CLI flags merged over
//! defaults in `merge`.

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub mod merge;

pub use merge::{merge_cli_with_config, AskSettings, CliOverrides};

/// Instruction used when `--prompt` is omitted ("Please summarize the source code.").
pub const DEFAULT_PROMPT: &str = "ソースコードを要約してください。";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: default_base_url() }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Figment layering for `ServiceConfig`, lowest precedence first.
///
/// `GEMINI_API_KEY`, then `GOOGLE_GENERATIVE_AI_API_KEY`, then any
/// `ASKREPO_`-prefixed variable (`ASKREPO_API_KEY`, `ASKREPO_BASE_URL`).
pub fn service_figment() -> Figment {
    Figment::from(Serialized::defaults(ServiceConfig::default()))
        .merge(Env::raw().only(&["GEMINI_API_KEY"]).map(|_| "api_key".into()))
        .merge(Env::raw().only(&["GOOGLE_GENERATIVE_AI_API_KEY"]).map(|_| "api_key".into()))
        .merge(Env::prefixed("ASKREPO_"))
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    Ok(service_figment().extract()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_layers_resolve_api_key_and_base_url() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "from-gemini");
            let config: ServiceConfig = service_figment().extract()?;
            assert_eq!(config.api_key.as_deref(), Some("from-gemini"));
            assert_eq!(config.base_url, DEFAULT_BASE_URL);

            jail.set_env("GOOGLE_GENERATIVE_AI_API_KEY", "from-google");
            let config: ServiceConfig = service_figment().extract()?;
            assert_eq!(config.api_key.as_deref(), Some("from-google"));

            jail.set_env("ASKREPO_API_KEY", "from-askrepo");
            jail.set_env("ASKREPO_BASE_URL", "http://localhost:8080/v1beta");
            let config: ServiceConfig = service_figment().extract()?;
            assert_eq!(config.api_key.as_deref(), Some("from-askrepo"));
            assert_eq!(config.base_url, "http://localhost:8080/v1beta");
            Ok(())
        });
    }
}
