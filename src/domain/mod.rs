//! Core domain types and models
//!
//! Defines the run configuration, the ordered candidate file set, the loaded
//! file contents, and the extension → fenced-code language table.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Files larger than this are left out of the prompt.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 524_288;

/// Number of leading bytes inspected by the binary heuristic.
pub const BINARY_SNIFF_BYTES: usize = 8192;

/// Configuration threaded through every pipeline stage.
///
/// Built once by the CLI (or a library caller). No stage looks up the
/// process working directory on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Base directory that relative paths and patterns are resolved against
    pub cwd: PathBuf,

    /// Root used for the default listing scope and for display-relative paths
    pub root: PathBuf,

    /// Per-file size ceiling in bytes
    pub max_file_bytes: u64,
}

impl PipelineConfig {
    pub fn new(cwd: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into(), root: root.into(), max_file_bytes: DEFAULT_MAX_FILE_BYTES }
    }

    pub fn max_file_bytes(mut self, bytes: u64) -> Self {
        self.max_file_bytes = bytes;
        self
    }
}

/// A file eligible for inclusion, before size/binary checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Path as it was discovered (listing output line or positional argument)
    pub display: String,

    /// Absolute path, produced by `normalize_path`
    pub path: PathBuf,
}

/// Insertion-ordered set of candidate files, unique by absolute path.
///
/// The first occurrence of a path wins; later duplicates are dropped
/// without reordering.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<CandidateFile>,
    seen: HashSet<PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file. Returns `false` if the path was already present.
    pub fn insert(&mut self, file: CandidateFile) -> bool {
        if !self.seen.insert(file.path.clone()) {
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateFile> {
        self.files.iter()
    }

    /// Discovered path strings in order.
    pub fn display_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.display.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a CandidateFile;
    type IntoIter = std::slice::Iter<'a, CandidateFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl FromIterator<CandidateFile> for FileSet {
    fn from_iter<I: IntoIterator<Item = CandidateFile>>(iter: I) -> Self {
        let mut set = FileSet::new();
        for file in iter {
            set.insert(file);
        }
        set
    }
}

/// Decoded text of the files that made it into the prompt.
///
/// Keyed by the discovered (pre-normalization) path string, in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContents {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl FileContents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the content for `key`, keeping its original position.
    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<String>) {
        let key = key.into();
        let content = content.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = content,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, content));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FileContents {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut contents = FileContents::new();
        for (k, v) in iter {
            contents.insert(k, v);
        }
        contents
    }
}

static LANGUAGE_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Python
        ("py", "python"),
        ("pyi", "python"),
        ("pyx", "python"),
        // JavaScript/TypeScript
        ("js", "javascript"),
        ("jsx", "jsx"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("mts", "typescript"),
        ("cts", "typescript"),
        // Systems
        ("rs", "rust"),
        ("go", "go"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("hpp", "cpp"),
        ("cc", "cpp"),
        ("cxx", "cpp"),
        ("zig", "zig"),
        // JVM/.NET
        ("java", "java"),
        ("kt", "kotlin"),
        ("kts", "kotlin"),
        ("scala", "scala"),
        ("groovy", "groovy"),
        ("cs", "csharp"),
        ("fs", "fsharp"),
        // Scripting
        ("rb", "ruby"),
        ("php", "php"),
        ("pl", "perl"),
        ("lua", "lua"),
        ("r", "r"),
        ("swift", "swift"),
        ("dart", "dart"),
        ("ex", "elixir"),
        ("exs", "elixir"),
        ("erl", "erlang"),
        ("hs", "haskell"),
        ("ml", "ocaml"),
        ("clj", "clojure"),
        // Shell
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "zsh"),
        ("fish", "fish"),
        ("ps1", "powershell"),
        ("bat", "batch"),
        // Markup
        ("md", "markdown"),
        ("mdx", "mdx"),
        ("rst", "rst"),
        ("adoc", "asciidoc"),
        ("html", "html"),
        ("htm", "html"),
        ("xml", "xml"),
        ("svg", "xml"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("astro", "astro"),
        // Styles
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        // Config and data
        ("json", "json"),
        ("jsonc", "jsonc"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("toml", "toml"),
        ("ini", "ini"),
        ("cfg", "ini"),
        ("env", "dotenv"),
        ("csv", "csv"),
        ("sql", "sql"),
        ("graphql", "graphql"),
        ("gql", "graphql"),
        ("proto", "protobuf"),
        ("tf", "hcl"),
        ("hcl", "hcl"),
        ("nix", "nix"),
        ("dockerfile", "dockerfile"),
        ("txt", "text"),
    ])
});

/// Fenced-code language tag for a file name.
///
/// Looks up the lower-cased text after the final `.`; an absent or unknown
/// extension yields an empty tag.
pub fn language_tag(filename: &str) -> &'static str {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let Some((_, ext)) = name.rsplit_once('.') else {
        return "";
    };
    LANGUAGE_TAGS.get(ext.to_lowercase().as_str()).copied().unwrap_or("")
}
