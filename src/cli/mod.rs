//! Command-line interface for askrepo
//!
//! A single command: collect files, render the prompt, stream the answer.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod ask;

pub use ask::AskArgs;

/// Ask a language model about the files of a repository
#[derive(Parser)]
#[command(name = "askrepo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    args: AskArgs,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --debug falls back to DEBUG.
    let filter = if cli.args.debug {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    ask::run(cli.args)
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parses_full_flag_set() {
        let cli = Cli::try_parse_from([
            "askrepo", "-p", "Explain", "-m", "gemini-2.0-flash", "--pro", "-i", "src/**", "-i",
            "*.toml", "-e", "*.test.ts", "-r", "/repo", "-d", "--dry-run", "src", "README.md",
        ])
        .expect("valid arguments");

        let args = cli.args;
        assert_eq!(args.prompt.as_deref(), Some("Explain"));
        assert_eq!(args.model.as_deref(), Some("gemini-2.0-flash"));
        assert!(args.pro);
        assert_eq!(args.include, vec!["src/**", "*.toml"]);
        assert_eq!(args.exclude, vec!["*.test.ts"]);
        assert_eq!(args.root.as_deref(), Some(std::path::Path::new("/repo")));
        assert!(args.debug);
        assert!(args.dry_run);
        assert_eq!(args.paths, vec!["src", "README.md"]);
    }

    #[test]
    fn defaults_are_empty() {
        let cli = Cli::try_parse_from(["askrepo"]).expect("no arguments");
        assert!(cli.args.prompt.is_none());
        assert!(cli.args.paths.is_empty());
        assert!(cli.args.include.is_empty());
        assert!(!cli.args.pro);
    }
}
