use std::path::{Path, PathBuf};

/// Grammar flavour used to parse a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsLanguageVariant {
    JavaScript,
    TypeScript,
    Tsx,
}

impl JsLanguageVariant {
    /// Pick the grammar for a file extension (without the leading dot).
    ///
    /// JavaScript's grammar already understands JSX, so `.jsx` and unknown
    /// extensions fall back to it.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "ts" | "mts" | "cts" => Self::TypeScript,
            "tsx" => Self::Tsx,
            _ => Self::JavaScript,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::JavaScript)
    }
}

/// Parsed source unit. Read-only for every mode.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    pub tree: tree_sitter::Tree,
    pub source: String,
    pub path: PathBuf,
    pub variant: JsLanguageVariant,
}

impl SyntaxTree {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }
}
