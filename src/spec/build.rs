use super::types::{
    ApiDefinition, Body, DeclaredType, JsonBody, Method, Property, Resource, Response, TypeExpr,
    TypeFlags, Verb,
};
use anyhow::{anyhow, bail, Context};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Render a YAML scalar key (`200`, `true`, `name`) as a string.
fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(Value::String(key.to_string()))
}

fn get_str(map: &Mapping, key: &str) -> Option<String> {
    get(map, key).and_then(|v| v.as_str()).map(String::from)
}

/// Read a `type` facet, which RAML allows as a string or a list.
fn type_expr_of(value: Option<&Value>) -> TypeExpr {
    match value {
        Some(Value::String(s)) => TypeExpr::parse(s),
        Some(Value::Sequence(items)) => TypeExpr::from_names(
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        _ => TypeExpr::Absent,
    }
}

/// Rewrite the long array form `type: array` + `items: X` as `X[]`.
fn with_array_items(type_expr: TypeExpr, items: Option<&Value>) -> TypeExpr {
    let is_array =
        matches!(&type_expr, TypeExpr::Single(s) if s.trim().eq_ignore_ascii_case("array"));
    if !is_array {
        return type_expr;
    }
    let item = match items {
        Some(Value::Mapping(m)) => match type_expr_of(get(m, "type")) {
            TypeExpr::Absent if get(m, "properties").is_some() => "object".to_string(),
            TypeExpr::Absent => "any".to_string(),
            expr => with_array_items(expr, get(m, "items")).raw(),
        },
        other => match type_expr_of(other) {
            TypeExpr::Absent => "any".to_string(),
            expr => expr.raw(),
        },
    };
    if item.contains('|') {
        TypeExpr::Single(format!("({item})[]"))
    } else {
        TypeExpr::Single(format!("{item}[]"))
    }
}

/// True for property keys RAML uses to declare map entries:
/// `[]`, `//` or a `/regex/` pattern. A pattern that does not compile is a
/// plain property name.
pub fn is_map_pattern_key(key: &str) -> bool {
    if key == "[]" || key == "//" {
        return true;
    }
    match key.strip_prefix('/').and_then(|k| k.strip_suffix('/')) {
        Some(pattern) if !pattern.is_empty() => Regex::new(pattern).is_ok(),
        _ => false,
    }
}

/// Derive the structural flags of a declaration from its expression and
/// facets.
pub fn derive_flags(
    type_expr: &TypeExpr,
    properties: &[Property],
    additional_properties: Option<&str>,
    enum_values: &[String],
) -> TypeFlags {
    let single = match type_expr {
        TypeExpr::Single(s) => Some(s.as_str()),
        _ => None,
    };
    let objectish = match type_expr {
        TypeExpr::Absent => true,
        TypeExpr::Single(s) => s.eq_ignore_ascii_case("object"),
        TypeExpr::Multiple(_) => false,
    };
    TypeFlags {
        array: single.is_some_and(|s| s.trim_end().ends_with("[]")),
        union: single.is_some_and(|s| s.contains('|')),
        map: objectish
            && (additional_properties.is_some()
                || properties.iter().any(|p| is_map_pattern_key(&p.name))),
        enumeration: !enum_values.is_empty(),
    }
}

/// Parse a property entry. Accepts the shorthand `name: Type`, the mapping
/// form `name: { type: Type, required: false }` and the `name?` marker.
pub fn build_property(key: &str, value: &Value) -> Property {
    let (name, mut required) = match key.strip_suffix('?') {
        Some(stripped) if !is_map_pattern_key(key) => (stripped.to_string(), false),
        _ => (key.to_string(), true),
    };
    let type_name = match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Sequence(_) => Some(type_expr_of(Some(value)).raw()),
        Value::Mapping(m) => {
            if let Some(r) = get(m, "required").and_then(|v| v.as_bool()) {
                required = r;
            }
            match with_array_items(type_expr_of(get(m, "type")), get(m, "items")) {
                TypeExpr::Absent if get(m, "properties").is_some() => Some("object".to_string()),
                TypeExpr::Absent => None,
                expr => Some(expr.raw()),
            }
        }
        _ => None,
    };
    Property {
        name,
        type_name,
        required,
    }
}

fn build_properties(value: Option<&Value>) -> Vec<Property> {
    let Some(Value::Mapping(map)) = value else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(k, v)| key_to_string(k).map(|k| build_property(&k, v)))
        .collect()
}

fn build_enum_values(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(key_to_string).collect(),
        _ => Vec::new(),
    }
}

/// Build a catalog entry from its YAML node.
pub fn build_declared_type(value: &Value) -> DeclaredType {
    match value {
        Value::Mapping(map) => {
            let type_expr = with_array_items(type_expr_of(get(map, "type")), get(map, "items"));
            let properties = build_properties(get(map, "properties"));
            let additional_properties = match get(map, "additionalProperties") {
                Some(Value::String(s)) => Some(s.trim().to_string()),
                Some(Value::Mapping(m)) => Some(match type_expr_of(get(m, "type")) {
                    TypeExpr::Absent => "any".to_string(),
                    expr => expr.raw(),
                }),
                _ => None,
            };
            let enum_values = build_enum_values(get(map, "enum"));
            let flags = derive_flags(
                &type_expr,
                &properties,
                additional_properties.as_deref(),
                &enum_values,
            );
            DeclaredType {
                type_expr,
                properties,
                flags,
                additional_properties,
                enum_values,
                description: get_str(map, "description"),
            }
        }
        other => {
            let type_expr = with_array_items(type_expr_of(Some(other)), None);
            let flags = derive_flags(&type_expr, &[], None, &[]);
            DeclaredType {
                type_expr,
                flags,
                ..DeclaredType::default()
            }
        }
    }
}

fn build_json_body(value: &Value) -> JsonBody {
    let declared = build_declared_type(value);
    JsonBody {
        type_expr: declared.type_expr,
        properties: declared.properties,
        flags: declared.flags,
        additional_properties: declared.additional_properties,
    }
}

/// Build a body node. Media types other than JSON are recorded but carry no
/// schema; a body declaring `type`/`properties` directly uses the default
/// (JSON) media type.
pub fn build_body(value: Option<&Value>) -> Body {
    let Some(Value::Mapping(map)) = value else {
        return Body::default();
    };
    if get(map, "type").is_some() || get(map, "properties").is_some() {
        return Body::json(build_json_body(&Value::Mapping(map.clone())));
    }
    let mut body = Body::default();
    for (k, v) in map {
        let Some(media) = key_to_string(k) else {
            continue;
        };
        if media.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
            body.json = Some(build_json_body(v));
        } else {
            body.other_media_types.push(media);
        }
    }
    body
}

fn build_method(verb: Verb, value: &Value) -> Method {
    let mut method = Method::new(verb);
    let Value::Mapping(map) = value else {
        return method;
    };
    method.description = get_str(map, "description");
    method.body = build_body(get(map, "body"));
    if let Some(Value::Mapping(responses)) = get(map, "responses") {
        for (code, resp) in responses {
            let Some(code) = key_to_string(code) else {
                continue;
            };
            let body = match resp {
                Value::Mapping(r) => build_body(get(r, "body")),
                _ => Body::default(),
            };
            method.responses.push(Response { code, body });
        }
    }
    method
}

/// Build a resource node and its nested resources, preserving declaration
/// order.
pub fn build_resource(uri: &str, value: &Value) -> anyhow::Result<Resource> {
    let mut resource = Resource::new(uri);
    let map = match value {
        Value::Mapping(map) => map,
        Value::Null => return Ok(resource),
        _ => bail!("resource {uri} must be a mapping"),
    };
    resource.display_name = get_str(map, "displayName");
    resource.description = get_str(map, "description");
    for (k, v) in map {
        let Some(key) = key_to_string(k) else {
            continue;
        };
        if key.starts_with('/') {
            let child = build_resource(&key, v).with_context(|| format!("in resource {uri}"))?;
            resource.nested.push(child);
        } else if let Some(verb) = Verb::parse(&key) {
            if resource.method(verb).is_some() {
                bail!("resource {uri} declares {verb} twice");
            }
            resource.methods.push(build_method(verb, v));
        }
    }
    Ok(resource)
}

/// Build the API model from a parsed RAML document.
pub fn build_api(root: &Value) -> anyhow::Result<ApiDefinition> {
    let map = root
        .as_mapping()
        .ok_or_else(|| anyhow!("RAML document root must be a mapping"))?;

    let mut types = BTreeMap::new();
    for section in ["types", "schemas"] {
        if let Some(Value::Mapping(catalog)) = get(map, section) {
            for (k, v) in catalog {
                if let Some(name) = key_to_string(k) {
                    types.insert(name, build_declared_type(v));
                }
            }
        }
    }

    let mut resources = Vec::new();
    for (k, v) in map {
        if let Some(key) = key_to_string(k).filter(|k| k.starts_with('/')) {
            resources.push(build_resource(&key, v)?);
        }
    }

    Ok(ApiDefinition {
        title: get_str(map, "title").unwrap_or_default(),
        base_uri: get_str(map, "baseUri"),
        types,
        resources,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_property_shorthand_and_optional_marker() {
        let p = build_property("name", &yaml("string"));
        assert_eq!(p.name, "name");
        assert_eq!(p.type_name.as_deref(), Some("string"));
        assert!(p.required);

        let p = build_property("nick?", &yaml("string"));
        assert_eq!(p.name, "nick");
        assert!(!p.required);

        let p = build_property("age", &yaml("{type: integer, required: false}"));
        assert_eq!(p.type_name.as_deref(), Some("integer"));
        assert!(!p.required);

        let p = build_property("anything", &yaml("{description: free form}"));
        assert_eq!(p.type_name, None);
    }

    #[test]
    fn test_map_pattern_keys_keep_their_name() {
        assert!(is_map_pattern_key("[]"));
        assert!(is_map_pattern_key("//"));
        assert!(is_map_pattern_key("/^note\\d+$/"));
        assert!(!is_map_pattern_key("/"));
        assert!(!is_map_pattern_key("name"));
        assert!(!is_map_pattern_key("/(unclosed/"));
    }

    #[test]
    fn test_declared_type_flags() {
        let t = build_declared_type(&yaml("type: string[]"));
        assert!(t.flags.array);

        let t = build_declared_type(&yaml("type: Cat | Dog"));
        assert!(t.flags.union);
        assert!(!t.flags.array);

        let t = build_declared_type(&yaml("{type: object, additionalProperties: string}"));
        assert!(t.flags.map);
        assert_eq!(t.additional_properties.as_deref(), Some("string"));

        let t = build_declared_type(&yaml("properties: {'[]': integer}"));
        assert!(t.flags.map);

        let t = build_declared_type(&yaml("{type: string, enum: [red, green]}"));
        assert!(t.flags.enumeration);
        assert_eq!(t.enum_values, vec!["red", "green"]);

        let t = build_declared_type(&yaml("type: [Animal, Cat]"));
        assert_eq!(
            t.type_expr,
            TypeExpr::Multiple(vec!["Animal".into(), "Cat".into()])
        );
    }

    #[test]
    fn test_long_array_form() {
        let t = build_declared_type(&yaml("{type: array, items: Cat}"));
        assert_eq!(t.type_expr, TypeExpr::Single("Cat[]".into()));
        assert!(t.flags.array);

        let t = build_declared_type(&yaml("{type: array, items: {type: string}}"));
        assert_eq!(t.type_expr, TypeExpr::Single("string[]".into()));

        let t = build_declared_type(&yaml("{type: array, items: Cat | Dog}"));
        assert_eq!(t.type_expr, TypeExpr::Single("(Cat | Dog)[]".into()));
        assert!(t.flags.array && t.flags.union);

        let t = build_declared_type(&yaml("array"));
        assert_eq!(t.type_expr, TypeExpr::Single("any[]".into()));

        let p = build_property("tags", &yaml("{type: array, items: string}"));
        assert_eq!(p.type_name.as_deref(), Some("string[]"));
    }

    #[test]
    fn test_declared_type_shorthand() {
        let t = build_declared_type(&yaml("Animal"));
        assert_eq!(t.type_expr, TypeExpr::Single("Animal".into()));
        assert!(t.properties.is_empty());
    }

    #[test]
    fn test_body_media_types() {
        let body = build_body(Some(&yaml(
            "{application/json: {properties: {id: string}}, application/xml: {}}",
        )));
        assert!(body.has_json());
        assert_eq!(body.other_media_types, vec!["application/xml"]);

        let body = build_body(Some(&yaml("{multipart/form-data: {}}")));
        assert!(!body.has_json());

        let body = build_body(Some(&yaml("{type: User}")));
        assert_eq!(
            body.json.unwrap().type_expr,
            TypeExpr::Single("User".into())
        );
    }

    #[test]
    fn test_nested_resources_keep_declaration_order() {
        let r = build_resource(
            "/users",
            &yaml("post: {}\nget: {}\n/{id}:\n  get: {}\n/active: {}\n"),
        )
        .unwrap();
        let verbs: Vec<_> = r.methods.iter().map(|m| m.verb).collect();
        assert_eq!(verbs, vec![Verb::Post, Verb::Get]);
        let children: Vec<_> = r.nested.iter().map(|n| n.uri.as_str()).collect();
        assert_eq!(children, vec!["/{id}", "/active"]);
    }

    #[test]
    fn test_response_codes_are_strings() {
        let r = build_resource(
            "/x",
            &yaml("{get: {responses: {200: {body: {application/json: {}}}, default: {}}}}"),
        )
        .unwrap();
        let m = r.method(Verb::Get).unwrap();
        assert_eq!(m.responses[0].code, "200");
        assert!(m.responses[0].body.has_json());
        assert_eq!(m.responses[1].code, "default");
        assert!(!m.responses[1].body.has_json());
    }

    #[test]
    fn test_root_must_be_mapping() {
        assert!(build_api(&yaml("- a\n- b")).is_err());
    }
}
