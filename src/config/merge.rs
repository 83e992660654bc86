//! CLI argument merging with defaults

use crate::llm::{DEFAULT_MODEL, PRO_MODEL};

use super::DEFAULT_PROMPT;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub pro: bool,
}

/// Resolved per-run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskSettings {
    pub instruction: String,
    pub model: String,
}

impl Default for AskSettings {
    fn default() -> Self {
        Self { instruction: DEFAULT_PROMPT.to_string(), model: DEFAULT_MODEL.to_string() }
    }
}

/// `--model` beats `--pro`, which beats the base model.
pub fn merge_cli_with_config(mut base: AskSettings, cli: CliOverrides) -> AskSettings {
    if let Some(prompt) = cli.prompt {
        base.instruction = prompt;
    }

    if let Some(model) = cli.model {
        base.model = model;
    } else if cli.pro {
        base.model = PRO_MODEL.to_string();
    }

    base
}
