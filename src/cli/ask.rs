//! Ask command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::io;
use std::path::PathBuf;

use crate::config::{load_service_config, merge_cli_with_config, AskSettings, CliOverrides};
use crate::domain::PipelineConfig;
use crate::llm::GeminiClient;
use crate::pipeline::{ask_repo, collect_file_contents, AskRequest};
use crate::scan::discover_root;
use crate::utils::normalize_path;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Files or directories to include (default: all git-tracked files under --root)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Instruction for the model
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Model identifier (overrides --pro)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Use the higher-quality default model
    #[arg(long)]
    pub pro: bool,

    /// Keep only files matching this glob (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Drop files matching this glob (repeatable, wins over --include)
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Root for relative display paths and the default listing (default: git top-level)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Print the resolved root, file list and prompt before sending
    #[arg(short, long)]
    pub debug: bool,

    /// Print the rendered prompt to stdout instead of calling the model
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: AskArgs) -> Result<()> {
    let settings = merge_cli_with_config(
        AskSettings::default(),
        CliOverrides { prompt: args.prompt, model: args.model, pro: args.pro },
    );
    if settings.instruction.trim().is_empty() {
        bail!("No prompt");
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let root = match &args.root {
        Some(root) => normalize_path(root, &cwd),
        None => discover_root(&cwd),
    };
    let config = PipelineConfig::new(cwd, root);

    let outcome = collect_file_contents(&config, &args.paths, &args.include, &args.exclude)?;

    let request = AskRequest::new(
        settings.instruction,
        settings.model,
        config.root.to_string_lossy(),
        outcome.contents,
    );

    if args.debug {
        eprintln!("root: {}", config.root.display());
        eprintln!("files:");
        for key in request.files.keys() {
            eprintln!("  {}", key);
        }
        for skipped in &outcome.skipped {
            eprintln!("  (skipped) {}: {}", skipped.path, skipped.reason);
        }
        eprintln!("prompt:\n{}", request.prompt());
    }

    if args.dry_run {
        println!("{}", request.prompt());
        return Ok(());
    }

    let service = load_service_config()?;
    let client = GeminiClient::new(&service)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    ask_repo(&request, &client, &mut out)
}
