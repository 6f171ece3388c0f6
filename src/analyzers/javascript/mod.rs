//! Shared tree-sitter helpers for the JavaScript-family scorers.

pub mod lang;
pub mod react;

pub use lang::LangMode;
pub use react::ReactMode;

use crate::analyzers::scope_reporter::ANONYMOUS;
use crate::core::parsing::{node_end_line, node_line, node_text};
use crate::core::LocationRange;
use crate::errors::Result;
use tree_sitter::Node;

/// Event emitted by [`walk_tree`].
#[derive(Clone, Copy, Debug)]
pub enum Visit<'tree> {
    Enter(Node<'tree>),
    Exit(Node<'tree>),
}

/// Depth-first walk over the named nodes below (and including) `root`,
/// calling `f` once on entry and once on exit of every node.
///
/// Uses a tree cursor rather than recursion so deeply nested sources cannot
/// exhaust the stack. The first error returned by `f` stops the walk.
pub fn walk_tree<'tree, F>(root: Node<'tree>, mut f: F) -> Result<()>
where
    F: FnMut(Visit<'tree>) -> Result<()>,
{
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_named() {
            f(Visit::Enter(node))?;
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            let node = cursor.node();
            if node.is_named() {
                f(Visit::Exit(node))?;
            }
            if node.id() == root.id() {
                return Ok(());
            }
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(());
            }
        }
    }
}

/// Named nodes that open a function scope.
pub fn is_function_like(node: &Node<'_>) -> bool {
    node.is_named()
        && matches!(
            node.kind(),
            "function_declaration"
                | "function_expression"
                | "function"
                | "generator_function_declaration"
                | "generator_function"
                | "arrow_function"
                | "method_definition"
        )
}

/// Class declarations, including the unnamed `export default class {}`
/// (class expressions elsewhere are not grouped).
pub fn is_class_like(node: &Node<'_>) -> bool {
    match node.kind() {
        "class_declaration" | "abstract_class_declaration" => true,
        "class" => node
            .parent()
            .is_some_and(|parent| parent.kind() == "export_statement"),
        _ => false,
    }
}

/// Identifier name of a declaration or member key, if it has one.
///
/// A computed key counts when it is a bare identifier (`[key]() {}`).
/// Private names (`#field`) and string or numeric keys have none.
pub fn declared_name<'a>(node: &Node<'_>, source: &'a str) -> Option<&'a str> {
    let name = node.child_by_field_name("name")?;
    let name = match name.kind() {
        "computed_property_name" => first_named_non_comment(name)?,
        _ => name,
    };
    matches!(
        name.kind(),
        "identifier" | "type_identifier" | "property_identifier"
    )
    .then(|| node_text(&name, source))
}

/// Whether a call or member access sits in an optional chain (`a?.b.c()`).
///
/// The chain is followed through callees and objects up to the first
/// non-chain node; parentheses end it.
pub fn is_optional_chain(node: Node<'_>) -> bool {
    let mut current = Some(node);
    while let Some(link) = current {
        let next_field = match link.kind() {
            "call_expression" => "function",
            "member_expression" | "subscript_expression" => "object",
            _ => return false,
        };
        let mut cursor = link.walk();
        if link
            .children(&mut cursor)
            .any(|child| child.kind() == "optional_chain")
        {
            return true;
        }
        current = link.child_by_field_name(next_field);
    }
    false
}

/// Scope name: explicit identifier, else member key, else `<anonymous>`.
///
/// Variable bindings (`const f = () => {}`) are deliberately not consulted.
pub fn function_name(node: &Node<'_>, source: &str) -> String {
    declared_name(node, source).unwrap_or(ANONYMOUS).to_string()
}

pub fn location(node: &Node<'_>) -> LocationRange {
    LocationRange::new(node_line(node), node_end_line(node))
}

/// Strip any number of wrapping parentheses.
pub fn unwrap_parens<'tree>(mut node: Node<'tree>) -> Node<'tree> {
    while node.kind() == "parenthesized_expression" {
        match first_named_non_comment(node) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

pub fn first_named_non_comment(node: Node<'_>) -> Option<Node<'_>> {
    named_non_comment_children(node).into_iter().next()
}

pub fn named_non_comment_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// Name a call targets: `foo(...)` → `foo`, `a.b.foo(...)` → `foo`.
pub fn callee_name<'a>(call: &Node<'_>, source: &'a str) -> Option<&'a str> {
    let callee = unwrap_parens(call.child_by_field_name("function")?);
    match callee.kind() {
        "identifier" => Some(node_text(&callee, source)),
        "member_expression" => callee
            .child_by_field_name("property")
            .filter(|p| p.kind() == "property_identifier")
            .map(|p| node_text(&p, source)),
        _ => None,
    }
}

/// Positional arguments of a call (empty for tagged templates).
pub fn call_arguments(call: Node<'_>) -> Vec<Node<'_>> {
    call.child_by_field_name("arguments")
        .filter(|args| args.kind() == "arguments")
        .map(named_non_comment_children)
        .unwrap_or_default()
}

/// Whether any descendant of `node` (excluding `node`) has the given kind.
pub fn has_descendant(node: Node<'_>, kind: &str) -> bool {
    let mut stack = named_non_comment_children(node);
    while let Some(current) = stack.pop() {
        if current.kind() == kind {
            return true;
        }
        stack.extend(named_non_comment_children(current));
    }
    false
}

/// String literal contents without quotes.
pub fn string_value<'a>(node: &Node<'_>, source: &'a str) -> Option<&'a str> {
    if node.kind() != "string" {
        return None;
    }
    let text = node_text(node, source);
    text.get(1..text.len().saturating_sub(1))
}

pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
