//! askrepo: ask a language model about the files of a repository
//!
//! This library collects candidate files (git-tracked or explicit paths),
//! filters them with include/exclude globs, drops oversized and binary
//! files, renders a single prompt, and streams the model's answer.

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod scan;
pub mod utils;

pub use domain::{FileContents, PipelineConfig};
pub use pipeline::{ask_repo, collect_file_contents, AskRequest};
