use super::body::walk_resource;
use super::config::{GenerateOptions, GenerationScope};
use super::format::format_output;
use super::lang::Language;
use super::resource::{describe_resource, emit_resource, EmitReport, Mode, ResourceDescription};
use super::structure::{from_declared_type, StructureDescription};
use super::templates::{check_create_dir, Renderer, TemplateSet, MOD_TEMPLATE, STRUCT_TEMPLATE};
use crate::spec::{load_api, ApiDefinition};
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Everything produced by one [`Generator::generate_all`] run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Catalog structures, in catalog order
    pub types: Vec<StructureDescription>,
    /// Body structures, in walk order
    pub bodies: Vec<StructureDescription>,
    pub resources: Vec<EmitReport>,
    /// Every file written during the run
    pub written: Vec<PathBuf>,
}

#[derive(Serialize)]
struct ModuleIndexData {
    modules: Vec<String>,
}

/// Turns a parsed RAML definition into source files for one target language.
#[derive(Debug)]
pub struct Generator {
    language: Language,
    package: String,
    renderer: Renderer,
}

impl Generator {
    pub fn new(
        language: Language,
        package: impl Into<String>,
        templates: TemplateSet,
    ) -> anyhow::Result<Self> {
        if templates.language() != language {
            anyhow::bail!(
                "Template set is for {} but the generator targets {language}",
                templates.language()
            );
        }
        Ok(Self {
            language,
            package: package.into(),
            renderer: Renderer::new(templates)?,
        })
    }

    /// Generator with the built-in templates, overridden from
    /// `options.template_dir` when set.
    pub fn from_options(options: &GenerateOptions) -> anyhow::Result<Self> {
        let mut templates = TemplateSet::builtin(options.language);
        if let Some(dir) = &options.template_dir {
            templates = templates.with_override_dir(dir)?;
        }
        Self::new(options.language, options.package.clone(), templates)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    fn write_structure(&self, sd: &StructureDescription, out_dir: &Path) -> anyhow::Result<PathBuf> {
        let path = out_dir.join(self.language.structure_file_name(&sd.name));
        self.renderer.render(sd, STRUCT_TEMPLATE, &path, true)?;
        Ok(path)
    }

    /// Write one structure per catalog type, in catalog order.
    pub fn generate_catalog_structures(
        &self,
        api: &ApiDefinition,
        out_dir: &Path,
    ) -> anyhow::Result<Vec<StructureDescription>> {
        check_create_dir(out_dir)?;
        let converter = self.language.converter();
        let mut out = Vec::with_capacity(api.types.len());
        for (name, decl) in &api.types {
            let sd = from_declared_type(name, decl, &self.package, converter);
            self.write_structure(&sd, out_dir)?;
            out.push(sd);
        }
        Ok(out)
    }

    /// Write the request/response body structures of every resource.
    ///
    /// Structures are written as the walk discovers them; the first failure
    /// stops the walk.
    pub fn generate_body_structures(
        &self,
        api: &ApiDefinition,
        out_dir: &Path,
    ) -> anyhow::Result<Vec<StructureDescription>> {
        check_create_dir(out_dir)?;
        let converter = self.language.converter();
        let mut out = Vec::new();
        let mut emit = |sd: StructureDescription| -> anyhow::Result<()> {
            self.write_structure(&sd, out_dir)?;
            out.push(sd);
            Ok(())
        };
        for resource in &api.resources {
            walk_resource(resource, "", &self.package, converter, &mut emit)?;
        }
        Ok(out)
    }

    /// Emit the files of every top-level resource and report what happened
    /// to each.
    pub fn emit_resources(
        &self,
        api: &ApiDefinition,
        out_dir: &Path,
        mode: Mode,
    ) -> anyhow::Result<Vec<EmitReport>> {
        check_create_dir(out_dir)?;
        let is_server = mode == Mode::Server;
        api.resources
            .iter()
            .map(|resource| {
                let desc = describe_resource(resource, "", &self.package, is_server);
                emit_resource(&self.renderer, self.language, desc, out_dir, mode)
            })
            .collect()
    }

    /// Emit the files of every top-level resource.
    pub fn generate_resource_scaffolding(
        &self,
        api: &ApiDefinition,
        out_dir: &Path,
        mode: Mode,
    ) -> anyhow::Result<Vec<ResourceDescription>> {
        Ok(self
            .emit_resources(api, out_dir, mode)?
            .into_iter()
            .map(|report| report.description)
            .collect())
    }

    /// Write `mod.rs` declaring every generated Rust module in `out_dir`.
    fn write_module_index(&self, out_dir: &Path) -> anyhow::Result<PathBuf> {
        let mut modules = Vec::new();
        for entry in std::fs::read_dir(out_dir)
            .with_context(|| format!("Failed to list output directory: {}", out_dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "rs") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if stem != "mod" {
                        modules.push(stem.to_string());
                    }
                }
            }
        }
        modules.sort();
        let path = out_dir.join("mod.rs");
        self.renderer
            .render(&ModuleIndexData { modules }, MOD_TEMPLATE, &path, true)?;
        Ok(path)
    }

    /// Run the selected generation steps in order: types, bodies, resources.
    pub fn generate_all(
        &self,
        api: &ApiDefinition,
        out_dir: &Path,
        mode: Mode,
        scope: GenerationScope,
    ) -> anyhow::Result<GenerationReport> {
        check_create_dir(out_dir)?;
        let mut report = GenerationReport::default();
        if scope.types {
            report.types = self.generate_catalog_structures(api, out_dir)?;
        }
        if scope.bodies {
            report.bodies = self.generate_body_structures(api, out_dir)?;
        }
        for sd in report.types.iter().chain(&report.bodies) {
            report
                .written
                .push(out_dir.join(self.language.structure_file_name(&sd.name)));
        }
        if scope.resources {
            report.resources = self.emit_resources(api, out_dir, mode)?;
            for r in &report.resources {
                report.written.extend(r.written.iter().cloned());
            }
        }
        if self.language == Language::Rust {
            report.written.push(self.write_module_index(out_dir)?);
        }
        Ok(report)
    }
}

/// Load a RAML file and generate everything `options` asks for.
///
/// A formatter failure is logged and does not fail the run; the generated
/// files are kept.
pub fn generate_from_spec(
    spec_path: &Path,
    options: &GenerateOptions,
) -> anyhow::Result<GenerationReport> {
    let api = load_api(spec_path)?;
    let generator = Generator::from_options(options)?;
    info!(
        title = %api.title,
        language = %options.language,
        mode = %options.mode,
        output = %options.output.display(),
        "generating"
    );
    let report = generator.generate_all(&api, &options.output, options.mode, options.scope)?;
    if options.format {
        if let Err(err) = format_output(&options.output, options.language) {
            warn!(error = %format!("{err:#}"), "formatting generated sources failed");
        }
    }
    info!(
        types = report.types.len(),
        bodies = report.bodies.len(),
        resources = report.resources.len(),
        files = report.written.len(),
        "generation complete"
    );
    Ok(report)
}
