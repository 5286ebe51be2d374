//! Resource scaffolding: interfaces, implementation stubs and clients.
//!
//! One set of files is produced per top-level resource; methods of nested
//! resources are flattened into it. In server mode the interface file is
//! rewritten on every run while the implementation stub is written once and
//! then left to the user.

use super::lang::Language;
use super::naming::{normalize_name, path_params};
use super::structure::{description_lines, REQ_BODY_SUFFIX, RESP_BODY_SUFFIX};
use super::templates::{
    check_create_dir, Renderer, WriteOutcome, CLIENT_SERVICE_TEMPLATE, RESOURCE_API_TEMPLATE,
    RESOURCE_IF_TEMPLATE,
};
use crate::spec::{Resource, Verb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Which side of the API to scaffold.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Interface + write-once implementation stub
    #[default]
    Server,
    /// Client service
    Client,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Server => write!(f, "server"),
            Mode::Client => write!(f, "client"),
        }
    }
}

/// One handler of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescription {
    /// Normalized full path + verb, e.g. `UsersIdGet`
    pub handler_name: String,
    /// Full path from the API root
    pub endpoint: String,
    pub verb: Verb,
    pub path_params: Vec<String>,
    /// Request body structure, when the request carries JSON
    pub req_body: Option<String>,
    /// Response body structure, when any response carries JSON
    pub resp_body: Option<String>,
    pub description: Vec<String>,
}

/// A resource node ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescription {
    pub name: String,
    pub endpoint: String,
    pub package: String,
    pub methods: Vec<MethodDescription>,
    pub nested: Vec<ResourceDescription>,
    pub is_server: bool,
    pub description: Vec<String>,
}

impl ResourceDescription {
    /// Methods of this node and all descendants, parents first.
    pub fn all_methods(&self) -> Vec<&MethodDescription> {
        let mut out: Vec<&MethodDescription> = self.methods.iter().collect();
        for child in &self.nested {
            out.extend(child.all_methods());
        }
        out
    }
}

/// Build the description of `resource`, whose parents' URIs concatenate to
/// `ancestor_path`.
pub fn describe_resource(
    resource: &Resource,
    ancestor_path: &str,
    package: &str,
    is_server: bool,
) -> ResourceDescription {
    let endpoint = format!("{ancestor_path}{}", resource.uri);
    let methods = Verb::WALK_ORDER
        .iter()
        .filter_map(|verb| resource.method(*verb))
        .map(|method| {
            let handler_name = normalize_name(&endpoint, Some(method.verb.title()));
            let req_body = method
                .body
                .has_json()
                .then(|| format!("{handler_name}{REQ_BODY_SUFFIX}"));
            let resp_body = method
                .responses
                .iter()
                .any(|r| r.body.has_json())
                .then(|| format!("{handler_name}{RESP_BODY_SUFFIX}"));
            MethodDescription {
                handler_name,
                endpoint: endpoint.clone(),
                verb: method.verb,
                path_params: path_params(&endpoint),
                req_body,
                resp_body,
                description: description_lines(method.description.as_deref()),
            }
        })
        .collect();
    let nested = resource
        .nested
        .iter()
        .map(|child| describe_resource(child, &endpoint, package, is_server))
        .collect();
    let description = resource
        .description
        .as_deref()
        .or(resource.display_name.as_deref());

    ResourceDescription {
        name: normalize_name(&endpoint, None),
        endpoint,
        package: package.to_string(),
        methods,
        nested,
        is_server,
        description: description_lines(description),
    }
}

/// Template context for the per-resource files.
#[derive(Debug, Serialize)]
struct ResourceTemplateData<'a> {
    name: &'a str,
    endpoint: &'a str,
    package: &'a str,
    description: &'a [String],
    routes: Vec<&'a MethodDescription>,
    /// Some route sends a JSON request body
    uses_req_json: bool,
    /// Some route decodes a JSON response body
    uses_resp_json: bool,
}

impl<'a> ResourceTemplateData<'a> {
    fn new(desc: &'a ResourceDescription) -> Self {
        let routes = desc.all_methods();
        let uses_req_json = routes.iter().any(|m| m.req_body.is_some());
        let uses_resp_json = routes.iter().any(|m| m.resp_body.is_some());
        Self {
            name: &desc.name,
            endpoint: &desc.endpoint,
            package: &desc.package,
            description: &desc.description,
            routes,
            uses_req_json,
            uses_resp_json,
        }
    }
}

/// Where a resource ended up after emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmitOutcome {
    Unvisited,
    InterfaceWritten,
    StubWritten,
    /// Interface regenerated, existing stub left untouched
    StubSkippedExists,
    ServiceWritten,
}

/// Result of emitting one top-level resource.
#[derive(Debug, Clone)]
pub struct EmitReport {
    pub description: ResourceDescription,
    pub outcome: EmitOutcome,
    /// Files written during this run (skipped files are not listed)
    pub written: Vec<PathBuf>,
}

/// Render the files of one top-level resource into `out_dir`.
pub fn emit_resource(
    renderer: &Renderer,
    language: Language,
    description: ResourceDescription,
    out_dir: &Path,
    mode: Mode,
) -> anyhow::Result<EmitReport> {
    check_create_dir(out_dir)?;
    let mut report = EmitReport {
        description,
        outcome: EmitOutcome::Unvisited,
        written: Vec::new(),
    };
    let data = ResourceTemplateData::new(&report.description);
    let file = |suffix: &str| out_dir.join(language.resource_file_name(&data.name, suffix));

    match mode {
        Mode::Server => {
            let if_path = file("if");
            renderer.render(&data, RESOURCE_IF_TEMPLATE, &if_path, true)?;
            let mut written = vec![if_path];
            let mut outcome = EmitOutcome::InterfaceWritten;

            let api_path = file("api");
            outcome = match renderer.render(&data, RESOURCE_API_TEMPLATE, &api_path, false)? {
                WriteOutcome::Written => {
                    written.push(api_path);
                    EmitOutcome::StubWritten
                }
                WriteOutcome::SkippedExisting => {
                    debug!(resource = %data.name, previous = ?outcome, "implementation stub exists");
                    EmitOutcome::StubSkippedExists
                }
            };
            report.written = written;
            report.outcome = outcome;
        }
        Mode::Client => {
            let service_path = file("service");
            renderer.render(&data, CLIENT_SERVICE_TEMPLATE, &service_path, true)?;
            report.written = vec![service_path];
            report.outcome = EmitOutcome::ServiceWritten;
        }
    }
    info!(
        resource = %report.description.name,
        outcome = ?report.outcome,
        "resource emitted"
    );
    Ok(report)
}
