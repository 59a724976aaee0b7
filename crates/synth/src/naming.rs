//! File name derivation
//!
//! Stub files are named after the stub type in snake case, using two passes:
//!
//! 1. insert `_` between any character and a following capitalized word
//!    (an uppercase letter followed by one or more lowercase letters)
//! 2. insert `_` between a lowercase letter or digit and a following
//!    uppercase letter
//!
//! and finally lowercase everything. The first pass splits acronym runs from
//! the word after them (`ABCWidget` → `ABC_Widget`), the second catches the
//! remaining boundaries (`Module_Metadata2X` → `Module_Metadata2_X`).
//!
//! Each pass scans the input left to right over non-overlapping matches, so
//! a match consumes the character before its word.

/// Convert a type name such as `GetModuleMetadata` to `get_module_metadata`
pub fn to_file_stem(type_name: &str) -> String {
    let chars: Vec<char> = type_name.chars().collect();
    let split = split_capitalized_words(&chars);
    split_lower_upper(&split).to_lowercase()
}

/// Pass 1: `(.)([A-Z][a-z]+)` → `$1_$2`
fn split_capitalized_words(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1].is_ascii_uppercase() && chars[i + 2].is_ascii_lowercase() {
            // Match: any char, capital, then a run of lowercase letters.
            let mut end = i + 3;
            while end < chars.len() && chars[end].is_ascii_lowercase() {
                end += 1;
            }
            out.push(chars[i]);
            out.push('_');
            out.extend_from_slice(&chars[i + 1..end]);
            i = end;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Pass 2: `([a-z0-9])([A-Z])` → `$1_$2`
fn split_lower_upper(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if i + 1 < chars.len()
            && (c.is_ascii_lowercase() || c.is_ascii_digit())
            && chars[i + 1].is_ascii_uppercase()
        {
            out.push(c);
            out.push('_');
            out.push(chars[i + 1]);
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }
    out
}
