//! Structural classification of declared types.
//!
//! RAML's advanced type features overlap syntactically: `type: object` with
//! an `enum` facet is both "object-looking" and enumerated, a union can also
//! carry array brackets. [`classify`] resolves these by checking categories
//! in a fixed priority order, first match wins:
//!
//! 1. multiple inheritance (list of parents)
//! 2. union
//! 3. array
//! 4. map
//! 5. plain object (`object`, or no `type` at all)
//! 6. enum
//! 7. specialization (no own properties)
//! 8. single inheritance (fallback)
//!
//! The first four are unambiguous markers and must be checked before the
//! literal-string checks that follow.

use crate::spec::{DeclaredType, TypeExpr};
use serde::Serialize;

/// Category a declaration compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    MultipleInheritance,
    Union,
    Array,
    Map,
    PlainObject,
    Enum,
    Specialization,
    SingleInheritance,
}

/// Outcome of classification, carrying what the synthesizer needs to build
/// the structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Parent names, trimmed and de-duplicated in declaration order
    MultipleInheritance(Vec<String>),
    /// Raw union expression
    Union(String),
    /// Raw array expression (`Cat[]`)
    Array(String),
    /// RAML type of the map values; `None` when it cannot be resolved
    Map(Option<String>),
    PlainObject,
    /// Base type name when the expression is a single name
    Enum(Option<String>),
    /// Parent type expression
    Specialization(String),
    /// Parent type name
    SingleInheritance(String),
}

impl Classification {
    pub fn kind(&self) -> StructureKind {
        match self {
            Classification::MultipleInheritance(_) => StructureKind::MultipleInheritance,
            Classification::Union(_) => StructureKind::Union,
            Classification::Array(_) => StructureKind::Array,
            Classification::Map(_) => StructureKind::Map,
            Classification::PlainObject => StructureKind::PlainObject,
            Classification::Enum(_) => StructureKind::Enum,
            Classification::Specialization(_) => StructureKind::Specialization,
            Classification::SingleInheritance(_) => StructureKind::SingleInheritance,
        }
    }
}

/// Resolve the value type of a map declaration.
///
/// An explicit `additionalProperties` wins; otherwise a declaration with
/// exactly one property (the `[]:` shorthand) uses that property's type.
fn map_value_type(decl: &DeclaredType) -> Option<String> {
    if let Some(additional) = &decl.additional_properties {
        return Some(additional.clone());
    }
    match decl.properties.as_slice() {
        [only] => Some(only.type_name.clone().unwrap_or_else(|| "any".to_string())),
        _ => None,
    }
}

fn dedup_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !out.iter().any(|seen| seen == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Classify a declared type. See the module docs for the priority order.
pub fn classify(decl: &DeclaredType) -> Classification {
    let raw = decl.type_expr.raw();

    if let TypeExpr::Multiple(names) = &decl.type_expr {
        if names.len() > 1 {
            return Classification::MultipleInheritance(dedup_names(names));
        }
    }
    if decl.flags.union {
        return Classification::Union(raw);
    }
    if decl.flags.array {
        return Classification::Array(raw);
    }
    if decl.flags.map {
        return Classification::Map(map_value_type(decl));
    }
    if raw.eq_ignore_ascii_case("object") {
        return Classification::PlainObject;
    }
    if decl.flags.enumeration {
        return match &decl.type_expr {
            TypeExpr::Single(name) => Classification::Enum(Some(name.clone())),
            _ => Classification::Enum(None),
        };
    }
    if decl.properties.is_empty() {
        return Classification::Specialization(raw);
    }
    Classification::SingleInheritance(raw)
}
