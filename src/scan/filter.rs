//! Include/exclude glob filtering

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use crate::utils::normalize_path;

/// Compiled include/exclude patterns.
///
/// Patterns are resolved against a base directory the same way candidate
/// paths are, then matched against absolute paths. `*` is allowed to cross
/// directory separators, so `*.test.ts` matches at any depth below the base.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl PathFilter {
    pub fn new(includes: &[String], excludes: &[String], base: &Path) -> Result<Self> {
        Ok(Self {
            include: build_globset(includes, base).context("Invalid --include pattern")?,
            exclude: build_globset(excludes, base).context("Invalid --exclude pattern")?,
        })
    }

    /// Filter that accepts everything.
    pub fn accept_all() -> Self {
        Self::default()
    }

    /// Exclude wins; with no include patterns every non-excluded path passes.
    pub fn matches(&self, path: &Path) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        match &self.include {
            Some(include) => include.is_match(path),
            None => true,
        }
    }
}

fn build_globset(patterns: &[String], base: &Path) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let resolved = normalize_path(pattern, base);
        let glob = Glob::new(&resolved.to_string_lossy())
            .with_context(|| format!("Invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
    }
    Ok(Some(builder.build()?))
}
