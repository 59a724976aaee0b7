//! Identifier and path helpers
//!
//! Contract, method and message names end up verbatim in generated Rust
//! source, so they must be plain identifiers. Paths such as
//! `dynrpc_runtime::ServerStream` are split into their owning path and
//! final segment.

/// Rust keywords that cannot be used as plain identifiers
///
/// Strict keywords first, then the reserved ones (2021 edition).
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield",
];

/// Check whether `name` is a plain (non-raw, non-keyword) ASCII identifier
///
/// `_` alone is rejected since it cannot name an item.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if name == "_" {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !KEYWORDS.contains(&name)
}

/// Split `a::b::C` into `("a::b", "C")`
///
/// Returns `None` when the path has no `::` separator or either side is empty.
pub fn split_path(path: &str) -> Option<(&str, &str)> {
    let (owner, name) = path.rsplit_once("::")?;
    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner, name))
}
