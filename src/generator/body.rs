//! Request/response body structures.
//!
//! Every method body carrying a JSON payload becomes a structure named after
//! the full resource path, the verb and the direction:
//! `/users/{id}` + GET response → `UsersIdGetResp`.

use super::lang::TypeConverter;
use super::naming::normalize_name;
use super::structure::{from_body, StructureDescription};
use crate::spec::{ApiDefinition, Method, Resource, Verb};
use tracing::debug;

fn walk_method(
    prefix: &str,
    method: &Method,
    package: &str,
    converter: &dyn TypeConverter,
    emit: &mut dyn FnMut(StructureDescription) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    if let Some(json) = &method.body.json {
        emit(from_body(prefix, json, package, true, converter))?;
    }

    let mut json_responses = method
        .responses
        .iter()
        .filter_map(|r| r.body.json.as_ref().map(|json| (r.code.as_str(), json)));
    if let Some((_, json)) = json_responses.next() {
        emit(from_body(prefix, json, package, false, converter))?;
    }
    for (code, _) in json_responses {
        debug!(
            structure = %prefix,
            code,
            "additional JSON response maps to an existing structure name; skipped"
        );
    }
    Ok(())
}

/// Emit the body structures of `resource` and its descendants.
///
/// `ancestor_path` is the concatenated URI of every parent resource (empty
/// for a top-level resource). Verbs are visited in [`Verb::WALK_ORDER`];
/// an error from `emit` stops the walk.
///
/// A method yields at most one `Resp` structure: every JSON response of a
/// method maps to the same name, so only the first one in declaration order
/// is synthesized and the rest are skipped with a debug log.
pub fn walk_resource(
    resource: &Resource,
    ancestor_path: &str,
    package: &str,
    converter: &dyn TypeConverter,
    emit: &mut dyn FnMut(StructureDescription) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    let full_path = format!("{ancestor_path}{}", resource.uri);
    let normalized = normalize_name(&full_path, None);

    for verb in Verb::WALK_ORDER {
        if let Some(method) = resource.method(verb) {
            let prefix = format!("{normalized}{}", verb.title());
            walk_method(&prefix, method, package, converter, emit)?;
        }
    }

    for child in &resource.nested {
        walk_resource(child, &full_path, package, converter, emit)?;
    }
    Ok(())
}

/// All body structures of the API in walk order.
pub fn collect_body_structures(
    api: &ApiDefinition,
    package: &str,
    converter: &dyn TypeConverter,
) -> anyhow::Result<Vec<StructureDescription>> {
    let mut out = Vec::new();
    let mut push = |sd: StructureDescription| -> anyhow::Result<()> {
        out.push(sd);
        Ok(())
    };
    for resource in &api.resources {
        walk_resource(resource, "", package, converter, &mut push)?;
    }
    Ok(out)
}
