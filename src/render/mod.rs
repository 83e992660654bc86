//! Prompt rendering

pub mod prompt;

pub use prompt::{render_file_block, render_prompt, SYSTEM_PROMPT};
