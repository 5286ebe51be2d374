use crate::generator::{
    classify, collect_body_structures, describe_resource, from_declared_type, generate_from_spec,
    load_config, resolve_config_path, GenerationScope, GeneratorConfig, Language, Mode,
    ResourceDescription, StructureDescription,
};
use crate::logging::{init_logging, LogFormat};
use crate::spec::{load_api, ApiDefinition};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Command-line interface for ramlgen
///
/// Generates Go or Rust sources from a RAML 1.0 definition.
#[derive(Debug, Parser)]
#[command(name = "ramlgen")]
#[command(about = "RAML code generator", long_about = None, version)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate structures and resource scaffolding from a RAML file
    Generate {
        /// Path to the RAML file
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory (default: ./generated)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language
        #[arg(short, long, value_enum)]
        language: Option<Language>,

        /// Go package / Rust module name of the generated files
        #[arg(short, long)]
        package: Option<String>,

        /// Scaffold the server side or a client
        #[arg(short, long, value_enum)]
        kind: Option<Mode>,

        /// Limit generation to specific parts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// Directory with template overrides (e.g. struct.go.txt)
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// Path to the config file (ramlgen.toml)
        /// If not provided, will auto-detect alongside the RAML file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip running gofmt / rustfmt on the output
        #[arg(long, default_value_t = false)]
        no_format: bool,
    },
    /// Print how every type and resource of a RAML file would be generated
    Inspect {
        /// Path to the RAML file
        #[arg(short, long)]
        spec: PathBuf,

        /// Target language used to render type names
        #[arg(short, long, value_enum, default_value_t = Language::Go)]
        language: Language,

        /// Print the full structure and resource descriptions as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// Parts of the output that can be generated on their own
///
/// Used with the `--only` flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// Structures of the `types` catalog
    Types,
    /// Request/response body structures
    Bodies,
    /// Resource interfaces and stubs, or client services
    Resources,
}

pub(crate) fn map_only_to_scope(only: Option<&[OnlyPart]>) -> GenerationScope {
    let Some(parts) = only else {
        return GenerationScope::all();
    };
    // Start with nothing, then enable selected parts
    let mut scope = GenerationScope::none();
    for p in parts {
        match p {
            OnlyPart::Types => scope.types = true,
            OnlyPart::Bodies => scope.bodies = true,
            OnlyPart::Resources => scope.resources = true,
        }
    }
    scope
}

/// Read the config file for `spec`, if any, with paths made relative to it.
fn file_config(explicit: Option<&Path>, spec: &Path) -> anyhow::Result<GeneratorConfig> {
    let Some(path) = resolve_config_path(explicit, spec) else {
        return Ok(GeneratorConfig::default());
    };
    match load_config(&path)? {
        Some(cfg) => {
            tracing::debug!(path = %path.display(), "loaded generator config");
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            Ok(cfg.relative_to(base))
        }
        None if explicit.is_some() => {
            anyhow::bail!("Config file not found: {}", path.display())
        }
        None => Ok(GeneratorConfig::default()),
    }
}

/// Text printed by `ramlgen inspect`.
pub fn inspect_report(api: &ApiDefinition, language: Language) -> anyhow::Result<String> {
    let converter = language.converter();
    let mut out = String::new();
    writeln!(out, "{}", api.title)?;

    writeln!(out, "types:")?;
    for (name, decl) in &api.types {
        let classification = classify(decl);
        let sd = from_declared_type(name, decl, "", converter);
        let shape = if sd.is_one_line_def {
            format!("= {}", sd.one_line_def)
        } else {
            format!("{} field(s)", sd.fields.len())
        };
        writeln!(out, "  {name}: {:?} {shape}", classification.kind())?;
    }

    writeln!(out, "bodies:")?;
    for sd in collect_body_structures(api, "", converter)? {
        writeln!(out, "  {}", sd.name)?;
    }

    writeln!(out, "resources:")?;
    for resource in &api.resources {
        let desc = describe_resource(resource, "", "", true);
        writeln!(out, "  {} ({})", desc.name, desc.endpoint)?;
        for m in desc.all_methods() {
            writeln!(out, "    {} {} -> {}", m.verb, m.endpoint, m.handler_name)?;
        }
    }
    Ok(out)
}

#[derive(Serialize)]
struct InspectJson {
    title: String,
    types: Vec<StructureDescription>,
    bodies: Vec<StructureDescription>,
    resources: Vec<ResourceDescription>,
}

/// JSON printed by `ramlgen inspect --json`.
pub fn inspect_json(api: &ApiDefinition, language: Language) -> anyhow::Result<String> {
    let converter = language.converter();
    let package = language.default_package();
    let report = InspectJson {
        title: api.title.clone(),
        types: api
            .types
            .iter()
            .map(|(name, decl)| from_declared_type(name, decl, package, converter))
            .collect(),
        bodies: collect_body_structures(api, package, converter)?,
        resources: api
            .resources
            .iter()
            .map(|r| describe_resource(r, "", package, true))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Execute a parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Generate {
            spec,
            output,
            language,
            package,
            kind,
            only,
            template_dir,
            config,
            no_format,
        } => {
            let from_cli = GeneratorConfig {
                language: *language,
                package: package.clone(),
                kind: *kind,
                template_dir: template_dir.clone(),
                output: output.clone(),
                format: no_format.then_some(false),
            };
            let mut options = from_cli
                .or(file_config(config.as_deref(), spec)?)
                .resolve();
            options.scope = map_only_to_scope(only.as_deref());

            let report = generate_from_spec(spec, &options)?;
            println!(
                "✅ Generated {} type(s), {} body structure(s), {} resource(s) into {}",
                report.types.len(),
                report.bodies.len(),
                report.resources.len(),
                options.output.display()
            );
            Ok(())
        }
        Commands::Inspect {
            spec,
            language,
            json,
        } => {
            let api = load_api(spec)?;
            if *json {
                println!("{}", inspect_json(&api, *language)?);
            } else {
                print!("{}", inspect_report(&api, *language)?);
            }
            Ok(())
        }
    }
}

/// Parse the process arguments, set up logging and run.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, LogFormat::from_env())?;
    run(&cli)
}
