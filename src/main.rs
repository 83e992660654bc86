//! askrepo: ask a language model about the files of a repository
//!
//! Collects repository files into one prompt and streams the model's
//! response to stdout.

use anyhow::Result;

fn main() -> Result<()> {
    askrepo::cli::run()
}
