//! End-to-end ask pipeline
//!
//! `collect_file_contents` turns targets into loaded file contents;
//! `ask_repo` renders the prompt and streams the model response into a
//! writer as chunks arrive.

use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

use crate::domain::{FileContents, PipelineConfig};
use crate::llm::{CompletionRequest, CompletionStreamer};
use crate::render::{render_prompt, SYSTEM_PROMPT};
use crate::scan::{load_contents, resolve_targets, LoadOutcome, PathFilter};

/// Resolve, filter and load the files for a run.
pub fn collect_file_contents(
    config: &PipelineConfig,
    positionals: &[String],
    includes: &[String],
    excludes: &[String],
) -> Result<LoadOutcome> {
    let filter = PathFilter::new(includes, excludes, &config.cwd)?;
    let files = resolve_targets(config, positionals, &filter)?;
    let outcome = load_contents(&files, config);
    info!(
        "Collected {} files ({} candidates, {} skipped)",
        outcome.contents.len(),
        files.len(),
        outcome.skipped.len()
    );
    Ok(outcome)
}

/// Everything needed to ask one question.
#[derive(Debug, Clone)]
pub struct AskRequest {
    pub instruction: String,
    pub model: String,
    pub root: String,
    pub files: FileContents,
    pub system_prompt: Option<String>,
}

impl AskRequest {
    pub fn new(
        instruction: impl Into<String>,
        model: impl Into<String>,
        root: impl Into<String>,
        files: FileContents,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            model: model.into(),
            root: root.into(),
            files,
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
        }
    }

    pub fn prompt(&self) -> String {
        render_prompt(&self.instruction, &self.files, &self.root)
    }
}

/// Send the rendered prompt and copy the response stream into `out`.
///
/// Each chunk is written and flushed as soon as it is received, then a
/// trailing newline ends the output.
pub fn ask_repo<S, W>(request: &AskRequest, streamer: &S, out: &mut W) -> Result<()>
where
    S: CompletionStreamer + ?Sized,
    W: Write + ?Sized,
{
    let completion = CompletionRequest {
        model: request.model.clone(),
        system_prompt: request.system_prompt.clone(),
        user_text: request.prompt(),
    };

    let stream = streamer
        .stream_completion(&completion)
        .with_context(|| format!("Completion request to {} failed", request.model))?;

    for chunk in stream {
        let chunk = chunk.context("Completion stream failed")?;
        out.write_all(chunk.as_bytes())?;
        out.flush()?;
    }
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
