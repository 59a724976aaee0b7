//! Signature translation
//!
//! Maps catalog type references onto the Rust types used in generated stubs.
//!
//! | catalog reference              | category  | rendered as                      |
//! |--------------------------------|-----------|----------------------------------|
//! | `Context`, `&Context`          | context   | unchanged                        |
//! | `Status`                       | error     | unchanged                        |
//! | `any`, `Box<dyn Any + Send>`   | any       | `Box<dyn std::any::Any + Send>`  |
//! | `<namespace>::Name`            | message   | `<alias>::Name`                  |
//! | `&<namespace>::Name`           | message   | `&<alias>::Name`                 |
//!
//! Anything else is unrecognized. The translator never guesses; the caller
//! turns `None` into a fatal error for the whole run.

use dynrpc_core::{is_identifier, TypeRef};

/// Rendering of the universal "any value" type
pub const ANY_TYPE: &str = "Box<dyn std::any::Any + Send>";

/// Rendering of the failure channel
pub const ERROR_TYPE: &str = "Status";

/// Category of a recognized type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Call-scoped context carrier
    Context {
        /// Passed by reference
        by_ref: bool,
    },
    /// Failure channel
    Error,
    /// Untyped payload
    Any,
    /// Named message type from the contract namespace
    Message {
        /// Type name within the namespace
        name: String,
        /// Passed by reference
        by_ref: bool,
    },
}

/// A recognized reference together with its rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    /// Category of the reference
    pub kind: TypeKind,
    /// Rust source text for the reference
    pub rendered: String,
}

impl Translated {
    /// True for the context category
    pub fn is_context(&self) -> bool {
        matches!(self.kind, TypeKind::Context { .. })
    }

    /// True for the error category
    pub fn is_error(&self) -> bool {
        self.kind == TypeKind::Error
    }

    /// True if the reference is borrowed
    pub fn is_by_ref(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Context { by_ref: true } | TypeKind::Message { by_ref: true, .. }
        )
    }
}

/// Translator bound to one catalog namespace and one output alias
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    namespace: &'a str,
    alias: &'a str,
}

impl<'a> Translator<'a> {
    /// `namespace` is the catalog's owning path; `alias` is the name the
    /// generated code imports it under
    pub fn new(namespace: &'a str, alias: &'a str) -> Self {
        Translator { namespace, alias }
    }

    /// Classify and render `type_ref`, or `None` if it is not recognized
    pub fn translate(&self, type_ref: &TypeRef) -> Option<Translated> {
        let kind = self.classify(type_ref.as_str())?;
        let rendered = self.render(&kind);
        Some(Translated { kind, rendered })
    }

    fn classify(&self, text: &str) -> Option<TypeKind> {
        let (by_ref, target) = match text.strip_prefix('&') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };

        if target == "Context" {
            return Some(TypeKind::Context { by_ref });
        }
        if by_ref {
            return self.message(target, true);
        }
        if target == ERROR_TYPE {
            return Some(TypeKind::Error);
        }
        if is_any(target) {
            return Some(TypeKind::Any);
        }
        self.message(target, false)
    }

    fn message(&self, target: &str, by_ref: bool) -> Option<TypeKind> {
        let name = target
            .strip_prefix(self.namespace)?
            .strip_prefix("::")?;
        if !is_identifier(name) {
            return None;
        }
        Some(TypeKind::Message {
            name: name.to_string(),
            by_ref,
        })
    }

    fn render(&self, kind: &TypeKind) -> String {
        match kind {
            TypeKind::Context { by_ref: true } => "&Context".to_string(),
            TypeKind::Context { by_ref: false } => "Context".to_string(),
            TypeKind::Error => ERROR_TYPE.to_string(),
            TypeKind::Any => ANY_TYPE.to_string(),
            TypeKind::Message { name, by_ref } => {
                let qualifier = if *by_ref { "&" } else { "" };
                format!("{}{}::{}", qualifier, self.alias, name)
            }
        }
    }
}

fn is_any(target: &str) -> bool {
    if target == "any" || target == "Any" {
        return true;
    }
    let compact: String = target.chars().filter(|c| !c.is_whitespace()).collect();
    compact == "Box<dynAny+Send>" || compact == "Box<dynstd::any::Any+Send>"
}
