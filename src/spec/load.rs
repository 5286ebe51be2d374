use super::build::build_api;
use super::types::ApiDefinition;
use anyhow::Context;
use std::path::Path;

/// Parse RAML source text into an [`ApiDefinition`].
///
/// The `#%RAML 1.0` header is a YAML comment, so the document is read as
/// plain YAML.
pub fn parse_api(content: &str) -> anyhow::Result<ApiDefinition> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).context("Failed to parse RAML document as YAML")?;
    build_api(&value)
}

/// Load and parse a RAML file.
pub fn load_api(path: &Path) -> anyhow::Result<ApiDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read RAML file: {}", path.display()))?;
    parse_api(&content).with_context(|| format!("Invalid RAML file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::spec::{TypeExpr, Verb};

    const SAMPLE: &str = r#"#%RAML 1.0
title: Pet Store
baseUri: http://localhost/api
types:
  Animal:
    properties:
      name: string
  Cat:
    type: Animal
    properties:
      lives?: integer
/pets:
  get:
    responses:
      200:
        body:
          application/json:
            type: Cat[]
"#;

    #[test]
    fn test_parse_api() {
        let api = parse_api(SAMPLE).unwrap();
        assert_eq!(api.title, "Pet Store");
        assert_eq!(api.base_uri.as_deref(), Some("http://localhost/api"));
        assert_eq!(api.types.len(), 2);
        assert_eq!(
            api.types["Cat"].type_expr,
            TypeExpr::Single("Animal".into())
        );
        assert!(!api.types["Cat"].properties[0].required);
        assert_eq!(api.resources.len(), 1);
        let get = api.resources[0].method(Verb::Get).unwrap();
        assert!(get.responses[0].body.json.as_ref().unwrap().flags.array);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_api(Path::new("/definitely/not/here.raml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read RAML file"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_api("title: [unclosed").is_err());
    }
}
