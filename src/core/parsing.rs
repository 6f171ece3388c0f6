//! Tree-sitter parser integration for JavaScript/TypeScript
//!
//! tree-sitter recovers from syntax errors instead of failing, so a tree that
//! contains `ERROR` or `MISSING` nodes is turned into a parse error here. The
//! rest of the crate only ever sees well-formed trees.

use super::ast::{JsLanguageVariant, SyntaxTree};
use crate::errors::{FlogError, Result};
use std::path::Path;
use tree_sitter::{Language as TsLanguage, Node, Parser};

/// Longest source excerpt quoted in a parse error message.
const EXCERPT_LIMIT: usize = 40;

fn get_language(variant: JsLanguageVariant) -> TsLanguage {
    match variant {
        JsLanguageVariant::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        JsLanguageVariant::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        JsLanguageVariant::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
    }
}

/// Parse a source unit, picking the grammar from the file extension.
pub fn parse_source(content: &str, path: &Path) -> Result<SyntaxTree> {
    parse_source_as(content, path, JsLanguageVariant::from_path(path))
}

/// Parse a source unit with an explicit grammar.
pub fn parse_source_as(
    content: &str,
    path: &Path,
    variant: JsLanguageVariant,
) -> Result<SyntaxTree> {
    let mut parser = Parser::new();
    parser
        .set_language(&get_language(variant))
        .map_err(|e| FlogError::parse(format!("Failed to load grammar: {e}"), path))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| FlogError::parse("Parser produced no tree", path))?;

    if let Some(node) = first_error_node(tree.root_node()) {
        return Err(error_from_node(node, content, path));
    }

    Ok(SyntaxTree {
        tree,
        source: content.to_string(),
        path: path.to_path_buf(),
        variant,
    })
}

/// Depth-first search for the first `ERROR` or `MISSING` node, only descending
/// into subtrees that report an error.
fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    if !root.has_error() {
        return None;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .children(&mut cursor)
            .filter(|child| child.has_error())
            .collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn error_from_node(node: Node<'_>, content: &str, path: &Path) -> FlogError {
    let position = node.start_position();
    let message = if node.is_missing() {
        format!("Missing `{}`", node.kind())
    } else {
        let excerpt = node_text(&node, content);
        let excerpt: String = excerpt
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(EXCERPT_LIMIT)
            .collect();
        if excerpt.trim().is_empty() {
            "Unexpected end of input".to_string()
        } else {
            format!("Unexpected token near `{}`", excerpt.trim())
        }
    };
    FlogError::parse_with_location(message, path, position.row + 1, position.column + 1)
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node<'_>, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node<'_>) -> usize {
    node.start_position().row + 1
}

/// Get the last line covered by a tree-sitter node (1-indexed)
pub fn node_end_line(node: &Node<'_>) -> usize {
    node.end_position().row + 1
}
