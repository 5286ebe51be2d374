use anyhow::Context;
use minijinja::Environment;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::lang::Language;
use super::naming::{path_params, title_case, to_snake_case};

/// Template rendering one structure (struct or alias)
pub const STRUCT_TEMPLATE: &str = "struct";
/// Template rendering the always-regenerated resource interface and routes
pub const RESOURCE_IF_TEMPLATE: &str = "resource_if";
/// Template rendering the write-once resource implementation stub
pub const RESOURCE_API_TEMPLATE: &str = "resource_api";
/// Template rendering a client service for a resource
pub const CLIENT_SERVICE_TEMPLATE: &str = "client_service";
/// Template rendering the Rust module index
pub const MOD_TEMPLATE: &str = "mod";

const TEMPLATE_NAMES: [&str; 5] = [
    STRUCT_TEMPLATE,
    RESOURCE_IF_TEMPLATE,
    RESOURCE_API_TEMPLATE,
    CLIENT_SERVICE_TEMPLATE,
    MOD_TEMPLATE,
];

fn builtin_source(language: Language, name: &str) -> Option<&'static str> {
    match (language, name) {
        (Language::Go, STRUCT_TEMPLATE) => Some(include_str!("../../templates/go/struct.go.txt")),
        (Language::Go, RESOURCE_IF_TEMPLATE) => {
            Some(include_str!("../../templates/go/resource_if.go.txt"))
        }
        (Language::Go, RESOURCE_API_TEMPLATE) => {
            Some(include_str!("../../templates/go/resource_api.go.txt"))
        }
        (Language::Go, CLIENT_SERVICE_TEMPLATE) => {
            Some(include_str!("../../templates/go/client_service.go.txt"))
        }
        (Language::Rust, STRUCT_TEMPLATE) => {
            Some(include_str!("../../templates/rust/struct.rs.txt"))
        }
        (Language::Rust, RESOURCE_IF_TEMPLATE) => {
            Some(include_str!("../../templates/rust/resource_if.rs.txt"))
        }
        (Language::Rust, RESOURCE_API_TEMPLATE) => {
            Some(include_str!("../../templates/rust/resource_api.rs.txt"))
        }
        (Language::Rust, CLIENT_SERVICE_TEMPLATE) => {
            Some(include_str!("../../templates/rust/client_service.rs.txt"))
        }
        (Language::Rust, MOD_TEMPLATE) => Some(include_str!("../../templates/rust/mod.rs.txt")),
        _ => None,
    }
}

/// The templates a [`Renderer`] is built with.
///
/// Starts from the templates compiled into the binary for a language; any
/// of them can be replaced from a directory or programmatically.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    language: Language,
    sources: BTreeMap<&'static str, Cow<'static, str>>,
}

impl TemplateSet {
    /// Built-in templates for `language`.
    pub fn builtin(language: Language) -> Self {
        let sources = TEMPLATE_NAMES
            .iter()
            .filter_map(|name| builtin_source(language, name).map(|s| (*name, Cow::Borrowed(s))))
            .collect();
        Self { language, sources }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// File name a template is looked up under in an override directory,
    /// e.g. `struct.go.txt`.
    pub fn file_name(language: Language, name: &str) -> String {
        format!("{name}.{}.txt", language.extension())
    }

    /// Replace built-in templates with the ones present in `dir`.
    ///
    /// Missing files keep their built-in version.
    pub fn with_override_dir(mut self, dir: &Path) -> anyhow::Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Template directory does not exist: {}", dir.display());
        }
        for name in TEMPLATE_NAMES {
            let path = dir.join(Self::file_name(self.language, name));
            if path.is_file() {
                let source = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read template: {}", path.display()))?;
                debug!(template = name, path = %path.display(), "using template override");
                self.sources.insert(name, Cow::Owned(source));
            }
        }
        Ok(self)
    }

    /// Replace a single template.
    pub fn with_template(mut self, name: &'static str, source: impl Into<String>) -> Self {
        self.sources.insert(name, Cow::Owned(source.into()));
        self
    }
}

/// Result of a single [`Renderer::render`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// Target existed and the write was not allowed to overwrite it
    SkippedExisting,
}

/// Lower-camel identifier: `user-id` → `userId`.
fn lower_camel(s: &str) -> String {
    let joined: String = s
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(title_case)
        .collect();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => "param".to_string(),
    }
}

/// Replace every `{param}` of a path using `f`.
fn rewrite_params(path: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = path.to_string();
    for param in path_params(path) {
        out = out.replace(&format!("{{{param}}}"), &f(&param));
    }
    out
}

/// Renders templates and writes the results, honouring the overwrite bit.
pub struct Renderer {
    env: Environment<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    pub fn new(templates: TemplateSet) -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_filter("snake_case", |s: String| to_snake_case(&s));
        env.add_filter("lower_camel", |s: String| lower_camel(&s));
        env.add_filter("go_path", |s: String| rewrite_params(&s, |_| "%v".to_string()));
        env.add_filter("rust_path", |s: String| {
            rewrite_params(&s, |p| format!("{{{}}}", to_snake_case(p)))
        });
        for (name, source) in templates.sources {
            env.add_template_owned(name, source)
                .with_context(|| format!("Invalid template: {name}"))?;
        }
        Ok(Self { env })
    }

    /// Render `template` with `data` into a string.
    pub fn render_to_string<S: Serialize>(&self, template: &str, data: &S) -> anyhow::Result<String> {
        let tmpl = self
            .env
            .get_template(template)
            .with_context(|| format!("Unknown template: {template}"))?;
        tmpl.render(data)
            .with_context(|| format!("Failed to render template: {template}"))
    }

    /// Render `template` with `data` and write it to `output_path`.
    ///
    /// When `overwrite_if_exists` is false and the file is already there,
    /// nothing is rendered or written. The existence check runs right
    /// before the write.
    pub fn render<S: Serialize>(
        &self,
        data: &S,
        template: &str,
        output_path: &Path,
        overwrite_if_exists: bool,
    ) -> anyhow::Result<WriteOutcome> {
        if !overwrite_if_exists && output_path.exists() {
            debug!(path = %output_path.display(), "skipping existing file");
            return Ok(WriteOutcome::SkippedExisting);
        }
        let rendered = self.render_to_string(template, data)?;
        fs::write(output_path, rendered)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        info!(path = %output_path.display(), template, "generated");
        Ok(WriteOutcome::Written)
    }
}

/// Create `dir` (and parents) if it is missing.
pub fn check_create_dir(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}
