//! Target-language lexicons.
//!
//! A [`TypeConverter`] maps RAML type names onto target-language type
//! literals and field identifiers. The classification logic never looks at
//! the literals it gets back; it only decides which conversion to ask for.

use super::naming::{resource_file_stem, title_case, to_snake_case, type_identifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type conversion for one target language.
pub trait TypeConverter {
    /// Convert a RAML type name (`string`, `Cat[]`, `Animal`, ...) into a
    /// target type literal. Unknown names become references to other
    /// generated structures, normalized with [`type_identifier`].
    fn convert(&self, type_name: &str) -> String;

    /// Convert a union expression (`Cat | Dog`) into the open "any value"
    /// shape of the target language.
    fn convert_union(&self, raw: &str) -> String;

    /// Mapping from string keys to an already converted value type.
    fn map_of(&self, value_type: &str) -> String;

    /// Representation used when a property has no declared type.
    fn any_type(&self) -> String;

    /// Public field identifier for a property wire name.
    fn field_name(&self, property_name: &str) -> String;
}

/// Strip one layer of grouping parentheses: `(A | B)` → `A | B`.
fn strip_parens(s: &str) -> Option<&str> {
    s.strip_prefix('(').and_then(|s| s.strip_suffix(')'))
}

/// Go lexicon: `string`, `int`, `[]T`, `map[string]T`, `interface{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTypes;

impl TypeConverter for GoTypes {
    fn convert(&self, type_name: &str) -> String {
        let t = type_name.trim();
        if let Some(elem) = t.strip_suffix("[]") {
            return format!("[]{}", self.convert(elem));
        }
        if let Some(inner) = strip_parens(t) {
            return self.convert(inner);
        }
        if t.contains('|') {
            return self.convert_union(t);
        }
        match t {
            "" | "any" | "nil" => self.any_type(),
            "string" | "date-only" | "time-only" | "datetime-only" | "datetime" => {
                "string".to_string()
            }
            "number" => "float64".to_string(),
            "integer" => "int".to_string(),
            "boolean" => "bool".to_string(),
            "file" => "[]byte".to_string(),
            "object" => "map[string]interface{}".to_string(),
            other => type_identifier(other),
        }
    }

    fn convert_union(&self, _raw: &str) -> String {
        "interface{}".to_string()
    }

    fn map_of(&self, value_type: &str) -> String {
        format!("map[string]{value_type}")
    }

    fn any_type(&self) -> String {
        "interface{}".to_string()
    }

    fn field_name(&self, property_name: &str) -> String {
        let name: String = property_name
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|w| !w.is_empty())
            .map(title_case)
            .collect();
        match name.chars().next() {
            None => "Field".to_string(),
            Some(c) if c.is_ascii_digit() => format!("F{name}"),
            Some(_) => name,
        }
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where", "while",
    "async", "await", "dyn", "abstract", "become", "box", "do", "final", "gen", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const RUST_NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Module name for a snake_case stem. Keywords and `mod` (taken by the
/// module index) get a trailing underscore.
fn rust_module_name(stem: &str) -> String {
    if RUST_KEYWORDS.contains(&stem) || RUST_NON_RAW_KEYWORDS.contains(&stem) {
        format!("{stem}_")
    } else {
        stem.to_string()
    }
}

/// Rust lexicon: `String`, `i64`, `Vec<T>`, `HashMap<String, T>`,
/// `serde_json::Value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypes;

impl TypeConverter for RustTypes {
    fn convert(&self, type_name: &str) -> String {
        let t = type_name.trim();
        if let Some(elem) = t.strip_suffix("[]") {
            return format!("Vec<{}>", self.convert(elem));
        }
        if let Some(inner) = strip_parens(t) {
            return self.convert(inner);
        }
        if t.contains('|') {
            return self.convert_union(t);
        }
        match t {
            "" | "any" | "nil" | "object" => self.any_type(),
            "string" | "date-only" | "time-only" | "datetime-only" | "datetime" => {
                "String".to_string()
            }
            "number" => "f64".to_string(),
            "integer" => "i64".to_string(),
            "boolean" => "bool".to_string(),
            "file" => "Vec<u8>".to_string(),
            other => type_identifier(other),
        }
    }

    fn convert_union(&self, _raw: &str) -> String {
        "serde_json::Value".to_string()
    }

    fn map_of(&self, value_type: &str) -> String {
        format!("std::collections::HashMap<String, {value_type}>")
    }

    fn any_type(&self) -> String {
        "serde_json::Value".to_string()
    }

    fn field_name(&self, property_name: &str) -> String {
        let mut name = to_snake_case(property_name);
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            name.insert(0, '_');
        }
        if RUST_NON_RAW_KEYWORDS.contains(&name.as_str()) {
            format!("{name}_")
        } else if RUST_KEYWORDS.contains(&name.as_str()) {
            format!("r#{name}")
        } else {
            name
        }
    }
}

/// Output language of the generator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Go,
    Rust,
}

static GO_TYPES: GoTypes = GoTypes;
static RUST_TYPES: RustTypes = RustTypes;

impl Language {
    pub fn converter(self) -> &'static dyn TypeConverter {
        match self {
            Language::Go => &GO_TYPES,
            Language::Rust => &RUST_TYPES,
        }
    }

    /// File extension of generated sources.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rs",
        }
    }

    /// File name of a generated structure.
    pub fn structure_file_name(self, structure_name: &str) -> String {
        match self {
            Language::Go => format!("{structure_name}.go"),
            Language::Rust => {
                format!("{}.rs", rust_module_name(&to_snake_case(structure_name)))
            }
        }
    }

    /// File name of one artifact of a top-level resource, e.g.
    /// `usersid_if.go` or `users_id_if.rs`.
    pub fn resource_file_name(self, resource_name: &str, suffix: &str) -> String {
        let stem = match self {
            Language::Go => resource_file_stem(resource_name),
            Language::Rust => to_snake_case(resource_name),
        };
        format!("{stem}_{suffix}.{}", self.extension())
    }

    /// Package (Go) or module (Rust) name used when none is configured.
    pub fn default_package(self) -> &'static str {
        match self {
            Language::Go => "main",
            Language::Rust => "api",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Go => write!(f, "go"),
            Language::Rust => write!(f, "rust"),
        }
    }
}
