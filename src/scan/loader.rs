//! File content loading with size and binary exclusion

use std::fmt;
use std::fs;
use tracing::{debug, warn};

use crate::domain::{FileContents, FileSet, PipelineConfig};
use crate::utils::{decode_text, is_binary_bytes};

/// Why a candidate file was left out of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooLarge { size: u64, limit: u64 },
    Binary,
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooLarge { size, limit } => {
                write!(f, "file too large ({} bytes > {} bytes)", size, limit)
            }
            SkipReason::Binary => write!(f, "binary file"),
            SkipReason::Unreadable(err) => write!(f, "unreadable: {}", err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

/// Result of loading a file set.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub contents: FileContents,
    pub skipped: Vec<SkippedFile>,
}

/// Read every file in `files`, in order, one at a time.
///
/// Oversized, binary and unreadable files are logged and skipped; they never
/// abort the batch.
pub fn load_contents(files: &FileSet, config: &PipelineConfig) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for file in files {
        match load_one(&file.path, config.max_file_bytes) {
            Ok(text) => {
                debug!("Loaded {} ({} bytes)", file.display, text.len());
                outcome.contents.insert(file.display.clone(), text);
            }
            Err(reason) => {
                warn!("Skipping {}: {}", file.display, reason);
                outcome.skipped.push(SkippedFile { path: file.display.clone(), reason });
            }
        }
    }

    outcome
}

fn load_one(path: &std::path::Path, limit: u64) -> Result<String, SkipReason> {
    let unreadable = |e: std::io::Error| SkipReason::Unreadable(e.to_string());

    let size = fs::metadata(path).map_err(unreadable)?.len();
    if size > limit {
        return Err(SkipReason::TooLarge { size, limit });
    }

    let bytes = fs::read(path).map_err(unreadable)?;
    if bytes.len() as u64 > limit {
        return Err(SkipReason::TooLarge { size: bytes.len() as u64, limit });
    }
    if is_binary_bytes(&bytes) {
        return Err(SkipReason::Binary);
    }

    Ok(decode_text(&bytes))
}
