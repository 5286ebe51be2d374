use super::classify::{classify, Classification, StructureKind};
use super::lang::TypeConverter;
use super::naming::type_identifier;
use crate::spec::{DeclaredType, JsonBody, Property};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Suffix of structures generated from request bodies.
pub const REQ_BODY_SUFFIX: &str = "Req";
/// Suffix of structures generated from response bodies.
pub const RESP_BODY_SUFFIX: &str = "Resp";

/// A field of a generated structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Target-language field identifier (`FirstName`, `first_name`)
    pub name: String,
    /// Wire name used for (de)serialization
    pub original_name: String,
    /// Target-language type literal
    pub type_name: String,
    pub required: bool,
    /// Embedded parent type rather than a named value
    pub is_composition: bool,
}

impl FieldDef {
    fn composition(parent: &str, converter: &dyn TypeConverter) -> Self {
        Self {
            name: converter.field_name(parent),
            original_name: parent.to_string(),
            type_name: converter.convert(parent),
            required: true,
            is_composition: true,
        }
    }
}

/// Everything a template needs to render one structure.
///
/// A description is either field-bearing (`fields` populated,
/// `one_line_def` empty) or a one-line alias (`is_one_line_def` set, the
/// aliased shape in `one_line_def`, `fields` empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureDescription {
    pub name: String,
    pub package: String,
    /// Keyed by wire name, or by parent type name for compositions
    pub fields: BTreeMap<String, FieldDef>,
    /// Target shape of the alias, e.g. `[]string` or `map[string]int`
    pub one_line_def: String,
    pub is_one_line_def: bool,
    pub description: Vec<String>,
    pub kind: StructureKind,
    pub enum_values: Vec<String>,
}

impl StructureDescription {
    pub fn composition_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values().filter(|f| f.is_composition)
    }

    pub fn own_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.values().filter(|f| !f.is_composition)
    }

    fn set_one_line(&mut self, shape: String) {
        self.fields.clear();
        self.one_line_def = shape;
        self.is_one_line_def = true;
    }

    fn add_composition(&mut self, parent: &str, converter: &dyn TypeConverter) {
        self.fields.insert(
            parent.to_string(),
            FieldDef::composition(parent, converter),
        );
    }

    /// Reshape the description according to its classification.
    fn apply(&mut self, classification: &Classification, converter: &dyn TypeConverter) {
        self.kind = classification.kind();
        match classification {
            Classification::MultipleInheritance(parents) => {
                self.fields.clear();
                for parent in parents {
                    self.add_composition(parent, converter);
                }
            }
            Classification::Union(raw) => self.set_one_line(converter.convert_union(raw)),
            Classification::Array(raw) => self.set_one_line(converter.convert(raw)),
            Classification::Map(Some(value)) => {
                let value = converter.convert(value);
                self.set_one_line(converter.map_of(&value));
            }
            Classification::Map(None) => {
                warn!(
                    structure = %self.name,
                    "map type has neither additionalProperties nor a single property; no alias generated"
                );
            }
            Classification::PlainObject => {}
            Classification::Enum(Some(base)) => self.set_one_line(converter.convert(base)),
            Classification::Enum(None) => {
                debug!(structure = %self.name, "enum over a non-single type; no alias generated");
            }
            Classification::Specialization(parent) => {
                self.set_one_line(converter.convert(parent))
            }
            Classification::SingleInheritance(parent) => self.add_composition(parent, converter),
        }
    }
}

/// Split a free-form description into comment lines.
pub(crate) fn description_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| d.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}

/// Build a field-bearing description from a property set.
///
/// No classification happens here; see [`from_declared_type`] and
/// [`from_body`].
pub fn synthesize(
    name: &str,
    properties: &[Property],
    package: &str,
    converter: &dyn TypeConverter,
) -> StructureDescription {
    let fields = properties
        .iter()
        .map(|prop| {
            let type_name = prop
                .type_name
                .as_deref()
                .map(|t| converter.convert(t))
                .unwrap_or_else(|| converter.any_type());
            let field = FieldDef {
                name: converter.field_name(&prop.name),
                original_name: prop.name.clone(),
                type_name,
                required: prop.required,
                is_composition: false,
            };
            (prop.name.clone(), field)
        })
        .collect();
    StructureDescription {
        name: name.to_string(),
        package: package.to_string(),
        fields,
        one_line_def: String::new(),
        is_one_line_def: false,
        description: Vec::new(),
        kind: StructureKind::PlainObject,
        enum_values: Vec::new(),
    }
}

/// Build the structure for a catalog type.
///
/// The catalog key is turned into an identifier with [`type_identifier`],
/// the same mapping converters apply to type references.
pub fn from_declared_type(
    name: &str,
    decl: &DeclaredType,
    package: &str,
    converter: &dyn TypeConverter,
) -> StructureDescription {
    let mut sd = synthesize(&type_identifier(name), &decl.properties, package, converter);
    sd.description = description_lines(decl.description.as_deref());
    sd.enum_values = decl.enum_values.clone();
    let classification = classify(decl);
    debug!(structure = %name, kind = ?classification.kind(), "classified catalog type");
    sd.apply(&classification, converter);
    sd
}

/// Build the structure for a request (`Req`) or response (`Resp`) body.
pub fn from_body(
    name_prefix: &str,
    body: &JsonBody,
    package: &str,
    is_request: bool,
    converter: &dyn TypeConverter,
) -> StructureDescription {
    let suffix = if is_request {
        REQ_BODY_SUFFIX
    } else {
        RESP_BODY_SUFFIX
    };
    let name = format!("{name_prefix}{suffix}");
    let decl = body.as_declared_type();
    let mut sd = synthesize(&name, &decl.properties, package, converter);
    sd.apply(&classify(&decl), converter);
    sd
}
