//! Candidate file listing via `git ls-files`

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

use super::filter::PathFilter;
use crate::domain::{CandidateFile, FileSet, PipelineConfig};
use crate::utils::normalize_path;

/// List the git-tracked files under `scope`, run from inside `scope`.
///
/// Paths are returned relative to `scope`, NUL-separated by git so names
/// are never C-quoted. This is best-effort: a missing `git` executable or a
/// non-zero exit yields an empty list.
pub fn list_tracked(scope: &Path) -> Vec<String> {
    let output = match Command::new("git")
        .args(["ls-files", "-z", "--", "."])
        .current_dir(scope)
        .output()
    {
        Ok(output) => output,
        Err(e) => {
            warn!("Failed to run git ls-files in {}: {}", scope.display(), e);
            return Vec::new();
        }
    };

    if !output.status.success() {
        warn!(
            "git ls-files in {} exited with {}: {}",
            scope.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Vec::new();
    }

    String::from_utf8_lossy(&output.stdout)
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve the candidate file set.
///
/// Without positionals the tracked files under `config.root` are listed.
/// Otherwise each positional is resolved against `config.cwd`: directories
/// are expanded through `list_tracked`, files are taken directly. Every
/// candidate passes through `filter`; duplicates collapse to their first
/// occurrence. Listed files are keyed relative to `config.cwd` when they lie
/// below it, and by absolute path otherwise.
///
/// A positional that cannot be stat'ed is an error.
pub fn resolve_targets(
    config: &PipelineConfig,
    positionals: &[String],
    filter: &PathFilter,
) -> Result<FileSet> {
    let mut files = FileSet::new();

    if positionals.is_empty() {
        add_tracked(&mut files, &config.root, config, filter);
        return Ok(files);
    }

    for target in positionals {
        let path = normalize_path(target, &config.cwd);
        let metadata = fs::metadata(&path)
            .with_context(|| format!("Failed to stat '{}'", path.display()))?;

        if metadata.is_dir() {
            add_tracked(&mut files, &path, config, filter);
        } else if filter.matches(&path) {
            files.insert(CandidateFile { display: target.clone(), path });
        } else {
            debug!("Filtered out {}", target);
        }
    }

    Ok(files)
}

fn add_tracked(files: &mut FileSet, scope: &Path, config: &PipelineConfig, filter: &PathFilter) {
    for entry in list_tracked(scope) {
        let path = normalize_path(&entry, scope);
        if filter.matches(&path) {
            let display = match path.strip_prefix(&config.cwd) {
                Ok(relative) => relative.to_string_lossy().into_owned(),
                Err(_) => path.to_string_lossy().into_owned(),
            };
            files.insert(CandidateFile { display, path });
        }
    }
}

/// Top-level directory of the git work tree containing `cwd`, or `cwd`
/// itself when there is none.
pub fn discover_root(cwd: &Path) -> PathBuf {
    match git2::Repository::discover(cwd) {
        Ok(repo) => match repo.workdir() {
            Some(workdir) => workdir.components().collect(),
            None => cwd.to_path_buf(),
        },
        Err(e) => {
            debug!("No git repository at {}: {}", cwd.display(), e.message());
            cwd.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &Path) -> PipelineConfig {
        PipelineConfig::new(dir, dir)
    }

    #[test]
    fn single_file_positional_bypasses_listing() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("README.md"), "# hi\n").expect("write");

        let files = resolve_targets(
            &config_for(dir.path()),
            &["README.md".to_string()],
            &PathFilter::accept_all(),
        )
        .expect("resolve");

        assert_eq!(files.display_paths(), vec!["README.md"]);
        assert!(files.contains(&dir.path().join("README.md")));
    }

    #[test]
    fn duplicate_positionals_collapse() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a.rs"), "fn a() {}").expect("write");
        let absolute = dir.path().join("a.rs").to_string_lossy().to_string();

        let files = resolve_targets(
            &config_for(dir.path()),
            &["a.rs".to_string(), absolute],
            &PathFilter::accept_all(),
        )
        .expect("resolve");

        assert_eq!(files.display_paths(), vec!["a.rs"]);
    }

    #[test]
    fn positional_files_are_filtered() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("x.ts"), "").expect("write");
        fs::write(dir.path().join("x.test.ts"), "").expect("write");

        let filter = PathFilter::new(&[], &["*.test.ts".to_string()], dir.path()).expect("filter");
        let files = resolve_targets(
            &config_for(dir.path()),
            &["x.ts".to_string(), "x.test.ts".to_string()],
            &filter,
        )
        .expect("resolve");

        assert_eq!(files.display_paths(), vec!["x.ts"]);
    }

    #[test]
    fn missing_positional_is_fatal() {
        let dir = TempDir::new().expect("tempdir");
        let err = resolve_targets(
            &config_for(dir.path()),
            &["nope.rs".to_string()],
            &PathFilter::accept_all(),
        )
        .expect_err("missing file");
        assert!(err.to_string().contains("nope.rs"));
    }

    #[test]
    fn listing_outside_a_repository_is_empty() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a.rs"), "").expect("write");
        assert!(list_tracked(dir.path()).is_empty());
    }

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().map(|o| o.status.success()).unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git").args(args).current_dir(dir).status().expect("run git");
        assert!(status.success(), "git {:?} failed", args);
    }

    #[test]
    fn non_ascii_tracked_names_are_not_quoted() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("説明.md"), "# 説明\n").expect("write");
        fs::write(dir.path().join("a.ts"), "const x=1;").expect("write");
        git(dir.path(), &["init", "--quiet"]);
        git(dir.path(), &["add", "説明.md", "a.ts"]);

        let mut listed = list_tracked(dir.path());
        listed.sort();
        assert_eq!(listed, vec!["a.ts", "説明.md"]);

        let files = resolve_targets(&config_for(dir.path()), &[], &PathFilter::accept_all())
            .expect("resolve");
        assert!(files.contains(&dir.path().join("説明.md")));
    }

    #[test]
    fn root_outside_cwd_is_listed_from_inside_the_root() {
        if !git_available() {
            return;
        }
        let repo = TempDir::new().expect("repo");
        let elsewhere = TempDir::new().expect("cwd");
        fs::create_dir_all(repo.path().join("src")).expect("mkdir");
        fs::write(repo.path().join("src/a.ts"), "const x=1;").expect("write");
        git(repo.path(), &["init", "--quiet"]);
        git(repo.path(), &["add", "."]);

        let config = PipelineConfig::new(elsewhere.path(), repo.path());
        let files = resolve_targets(&config, &[], &PathFilter::accept_all()).expect("resolve");
        let expected = repo.path().join("src/a.ts");
        let expected_key = expected.to_string_lossy().into_owned();
        assert_eq!(files.display_paths(), vec![expected_key.as_str()]);

        let files = resolve_targets(
            &config,
            &[repo.path().join("src").to_string_lossy().into_owned()],
            &PathFilter::accept_all(),
        )
        .expect("resolve directory");
        assert!(files.contains(&expected));
    }

    #[test]
    fn directory_listing_is_keyed_relative_to_cwd() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().expect("tempdir");
        fs::create_dir_all(dir.path().join("src")).expect("mkdir");
        fs::write(dir.path().join("src/a.ts"), "const x=1;").expect("write");
        fs::write(dir.path().join("README.md"), "# r").expect("write");
        git(dir.path(), &["init", "--quiet"]);
        git(dir.path(), &["add", "."]);

        let files = resolve_targets(
            &config_for(dir.path()),
            &["src".to_string()],
            &PathFilter::accept_all(),
        )
        .expect("resolve");
        assert_eq!(files.display_paths(), vec!["src/a.ts"]);
    }

    #[test]
    fn discover_root_falls_back_to_cwd() {
        let dir = TempDir::new().expect("tempdir");
        assert_eq!(discover_root(dir.path()), dir.path());
    }

    #[test]
    fn discover_root_finds_work_tree_top() {
        let dir = TempDir::new().expect("tempdir");
        git2::Repository::init(dir.path()).expect("init");
        let nested = dir.path().join("src/deep");
        fs::create_dir_all(&nested).expect("mkdir");

        let root = discover_root(&nested);
        assert_eq!(
            root.canonicalize().expect("canonical root"),
            dir.path().canonicalize().expect("canonical tempdir")
        );
    }
}
