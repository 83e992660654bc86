//! Prompt document assembly
//!
//! The instruction comes first, followed by a `# Files` section holding one
//! fenced block per file. Each fence carries `<language>:<relative path>` as
//! its info string.

use crate::domain::{language_tag, FileContents};
use crate::utils::display_relative;

/// System instruction describing the layout of the rendered prompt.
pub const SYSTEM_PROMPT: &str = "You are an assistant that answers questions about a source code \
repository. The user message starts with a request, followed by a \"# Files\" section. Each file \
is given as a fenced code block whose info string is `<language>:<relative path>`, for example \
```rust:src/main.rs. Base your answer on these files and cite file paths when referring to them.";

/// Render one fenced block for `key` relative to `root`.
pub fn render_file_block(key: &str, content: &str, root: &str) -> String {
    format!(
        "```{}:{}\n{}\n```",
        language_tag(key),
        display_relative(key, root),
        content.trim()
    )
}

/// Build the prompt document sent to the model.
pub fn render_prompt(instruction: &str, files: &FileContents, root: &str) -> String {
    let blocks: Vec<String> = files
        .iter()
        .map(|(key, content)| render_file_block(key, content, root))
        .collect();

    format!("{}\n\n# Files\n\n{}", instruction, blocks.join("\n\n")).trim().to_string()
}
