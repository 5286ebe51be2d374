use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP verbs a RAML resource may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Verb {
    /// Order in which generators visit the verbs of a resource.
    pub const WALK_ORDER: [Verb; 7] = [
        Verb::Get,
        Verb::Post,
        Verb::Head,
        Verb::Put,
        Verb::Delete,
        Verb::Patch,
        Verb::Options,
    ];

    /// Parse a RAML method key (`get`, `post`, ...). Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Some(Verb::Get),
            "post" => Some(Verb::Post),
            "put" => Some(Verb::Put),
            "delete" => Some(Verb::Delete),
            "patch" => Some(Verb::Patch),
            "head" => Some(Verb::Head),
            "options" => Some(Verb::Options),
            _ => None,
        }
    }

    /// Title-cased name used in generated identifiers (`Get`, `Post`, ...).
    pub fn title(self) -> &'static str {
        match self {
            Verb::Get => "Get",
            Verb::Post => "Post",
            Verb::Put => "Put",
            Verb::Delete => "Delete",
            Verb::Patch => "Patch",
            Verb::Head => "Head",
            Verb::Options => "Options",
        }
    }

    /// Upper-case wire name (`GET`, `POST`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` facet of a RAML declaration.
///
/// RAML allows the facet to be missing, a single type name, or a list of
/// parents (multiple inheritance). A comma-joined string is treated the same
/// as a list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeExpr {
    #[default]
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl TypeExpr {
    /// Build an expression from a raw `type` string, splitting on commas.
    pub fn parse(raw: &str) -> Self {
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self::from_names(names)
    }

    /// Build an expression from an explicit list of parent names.
    pub fn from_names(mut names: Vec<String>) -> Self {
        match names.len() {
            0 => TypeExpr::Absent,
            1 => TypeExpr::Single(names.remove(0)),
            _ => TypeExpr::Multiple(names),
        }
    }

    /// Expression text as written; an absent facet defaults to `object`.
    pub fn raw(&self) -> String {
        match self {
            TypeExpr::Absent => "object".to_string(),
            TypeExpr::Single(name) => name.clone(),
            TypeExpr::Multiple(names) => names.join(", "),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TypeExpr::Absent)
    }
}

/// Structural markers the parser derives from a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeFlags {
    pub array: bool,
    pub map: bool,
    pub enumeration: bool,
    pub union: bool,
}

/// A property of a declared type or of a JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Wire name with any trailing `?` already stripped
    pub name: String,
    /// Declared type; `None` means "any"
    pub type_name: Option<String>,
    pub required: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A named entry of the API's type catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredType {
    pub type_expr: TypeExpr,
    pub properties: Vec<Property>,
    pub flags: TypeFlags,
    pub additional_properties: Option<String>,
    pub enum_values: Vec<String>,
    pub description: Option<String>,
}

impl DeclaredType {
    pub fn new(type_expr: TypeExpr) -> Self {
        Self {
            type_expr,
            ..Self::default()
        }
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// JSON payload schema of a body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonBody {
    pub type_expr: TypeExpr,
    pub properties: Vec<Property>,
    pub flags: TypeFlags,
    pub additional_properties: Option<String>,
}

impl JsonBody {
    /// View the payload as an anonymous declared type so it can go through
    /// the same classification as catalog entries.
    pub fn as_declared_type(&self) -> DeclaredType {
        DeclaredType {
            type_expr: self.type_expr.clone(),
            properties: self.properties.clone(),
            flags: self.flags,
            additional_properties: self.additional_properties.clone(),
            enum_values: Vec::new(),
            description: None,
        }
    }
}

/// Request or response body. Only the JSON representation matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub json: Option<JsonBody>,
    /// Media types other than `application/json` that were declared
    pub other_media_types: Vec<String>,
}

impl Body {
    pub fn json(body: JsonBody) -> Self {
        Self {
            json: Some(body),
            other_media_types: Vec::new(),
        }
    }

    pub fn has_json(&self) -> bool {
        self.json.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status-code-like key (`200`, `201`, `default`)
    pub code: String,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub verb: Verb,
    pub description: Option<String>,
    pub body: Body,
    pub responses: Vec<Response>,
}

impl Method {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            description: None,
            body: Body::default(),
            responses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Relative URI segment, e.g. `/users` or `/{id}`
    pub uri: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub methods: Vec<Method>,
    pub nested: Vec<Resource>,
}

impl Resource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            display_name: None,
            description: None,
            methods: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn method(&self, verb: Verb) -> Option<&Method> {
        self.methods.iter().find(|m| m.verb == verb)
    }
}

/// Parsed RAML document, read-only to the generators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDefinition {
    pub title: String,
    pub base_uri: Option<String>,
    pub types: BTreeMap<String, DeclaredType>,
    pub resources: Vec<Resource>,
}
