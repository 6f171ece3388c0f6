use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extensions collected from directories and accepted as explicit inputs.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Collects source units from a mix of file and directory inputs.
pub struct FileWalker {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
    exclude_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            extensions: SOURCE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude_patterns: vec![],
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Glob patterns matched against the full path. Invalid patterns are an
    /// error rather than silently never matching.
    pub fn with_exclude_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p).with_context(|| format!("Invalid exclude pattern '{p}'")))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Sorted, de-duplicated list of files to analyze.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for root in &self.roots {
            if root.is_file() {
                if self.should_process(root) {
                    files.insert(root.clone());
                }
                continue;
            }
            if !root.exists() {
                tracing::warn!("Skipping {}: no such file or directory", root.display());
                continue;
            }

            let walker = WalkBuilder::new(root).hidden(false).git_ignore(true).build();
            for entry in walker {
                let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
                let path = entry.path();
                if path.is_file() && self.should_process(path) {
                    files.insert(path.to_path_buf());
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    fn should_process(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy().to_ascii_lowercase();
        if !self.extensions.iter().any(|e| *e == ext) {
            return false;
        }

        let path_str = path.to_string_lossy();
        !self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&path_str))
    }
}

/// Discover source files under `roots`, skipping `exclude` globs.
pub fn find_source_files(roots: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    FileWalker::new(roots.to_vec())
        .with_exclude_patterns(exclude)?
        .walk()
}
