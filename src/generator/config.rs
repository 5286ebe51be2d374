//! Generator configuration for ramlgen
//!
//! Settings can live in a `ramlgen.toml` file next to the RAML definition.
//! Command-line flags win over the file, the file wins over defaults.

use super::lang::Language;
use super::resource::Mode;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to the RAML definition.
pub const CONFIG_FILE_NAME: &str = "ramlgen.toml";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Contents of `ramlgen.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub language: Option<Language>,
    /// Go package / Rust module name of generated files
    pub package: Option<String>,
    pub kind: Option<Mode>,
    /// Directory with template overrides
    pub template_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Run the language formatter after generation
    pub format: Option<bool>,
}

impl GeneratorConfig {
    /// Fill every unset field of `self` from `fallback`.
    pub fn or(self, fallback: GeneratorConfig) -> GeneratorConfig {
        GeneratorConfig {
            language: self.language.or(fallback.language),
            package: self.package.or(fallback.package),
            kind: self.kind.or(fallback.kind),
            template_dir: self.template_dir.or(fallback.template_dir),
            output: self.output.or(fallback.output),
            format: self.format.or(fallback.format),
        }
    }

    /// Resolve relative paths against `base`, the directory holding the
    /// config file.
    pub fn relative_to(mut self, base: &Path) -> GeneratorConfig {
        let rebase = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.template_dir = self.template_dir.map(rebase);
        self.output = self.output.map(rebase);
        self
    }

    /// Apply defaults to every field still unset.
    pub fn resolve(self) -> GenerateOptions {
        let language = self.language.unwrap_or_default();
        GenerateOptions {
            language,
            package: self
                .package
                .unwrap_or_else(|| language.default_package().to_string()),
            mode: self.kind.unwrap_or_default(),
            template_dir: self.template_dir,
            output: self
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            format: self.format.unwrap_or(true),
            scope: GenerationScope::all(),
        }
    }
}

/// Which groups of artifacts to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    /// Catalog types
    pub types: bool,
    /// Request/response body structures
    pub bodies: bool,
    /// Resource interfaces, stubs or clients
    pub resources: bool,
}

impl GenerationScope {
    pub fn all() -> Self {
        Self {
            types: true,
            bodies: true,
            resources: true,
        }
    }

    pub fn none() -> Self {
        Self {
            types: false,
            bodies: false,
            resources: false,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

/// Fully resolved settings of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub language: Language,
    pub package: String,
    pub mode: Mode,
    pub template_dir: Option<PathBuf>,
    pub output: PathBuf,
    pub format: bool,
    pub scope: GenerationScope,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GeneratorConfig::default().resolve()
    }
}

/// Load a generator config file.
///
/// Returns `Ok(None)` when the file does not exist and an error when it
/// exists but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read generator config: {}", config_path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse generator config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// `ramlgen.toml` next to the RAML file, if present.
pub fn auto_detect_config_path(spec_path: &Path) -> Option<PathBuf> {
    let config_path = spec_path.parent()?.join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the RAML file
/// 3. None (no config)
///
/// An explicit path is returned even if it does not exist, so that the
/// caller can report it.
pub fn resolve_config_path(explicit_path: Option<&Path>, spec_path: &Path) -> Option<PathBuf> {
    match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => auto_detect_config_path(spec_path),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::fs;

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("ramlgen.toml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramlgen.toml");
        fs::write(
            &path,
            r#"
language = "rust"
package = "petstore"
kind = "client"
template_dir = "tmpl"
output = "out"
format = false
"#,
        )
        .unwrap();
        let cfg = load_config(&path).unwrap().unwrap();
        assert_eq!(cfg.language, Some(Language::Rust));
        assert_eq!(cfg.kind, Some(Mode::Client));
        assert_eq!(cfg.package.as_deref(), Some("petstore"));
        assert_eq!(cfg.template_dir, Some(PathBuf::from("tmpl")));
        assert_eq!(cfg.format, Some(false));
    }

    #[test]
    fn test_load_malformed_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ramlgen.toml");
        fs::write(&path, "language = \"cobol\"\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("ramlgen.toml"));

        fs::write(&path, "colour = \"blue\"\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_auto_detect_and_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("api.raml");
        assert_eq!(auto_detect_config_path(&spec), None);
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        assert_eq!(
            auto_detect_config_path(&spec),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );

        let explicit = dir.path().join("other.toml");
        assert_eq!(
            resolve_config_path(Some(&explicit), &spec),
            Some(explicit.clone())
        );
        assert_eq!(
            resolve_config_path(None, &spec),
            Some(dir.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_relative_to_rebases_paths() {
        let cfg = GeneratorConfig {
            output: Some(PathBuf::from("out")),
            template_dir: Some(PathBuf::from("/abs/tmpl")),
            ..GeneratorConfig::default()
        }
        .relative_to(Path::new("/project"));
        assert_eq!(cfg.output, Some(PathBuf::from("/project/out")));
        assert_eq!(cfg.template_dir, Some(PathBuf::from("/abs/tmpl")));
    }

    #[test]
    fn test_precedence_and_defaults() {
        let cli = GeneratorConfig {
            package: Some("cli".into()),
            ..GeneratorConfig::default()
        };
        let file = GeneratorConfig {
            language: Some(Language::Rust),
            package: Some("file".into()),
            ..GeneratorConfig::default()
        };
        let opts = cli.or(file).resolve();
        assert_eq!(opts.language, Language::Rust);
        assert_eq!(opts.package, "cli");
        assert_eq!(opts.mode, Mode::Server);
        assert_eq!(opts.output, PathBuf::from("generated"));
        assert!(opts.format);

        let defaults = GenerateOptions::default();
        assert_eq!(defaults.language, Language::Go);
        assert_eq!(defaults.package, "main");
        assert_eq!(defaults.scope, GenerationScope::all());
    }
}
