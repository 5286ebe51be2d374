//! # ramlgen
//!
//! **ramlgen** generates Go or Rust source files from a
//! [RAML 1.0](https://github.com/raml-org/raml-spec) API definition.
//!
//! ## Overview
//!
//! For every RAML file it produces:
//!
//! - a structure per entry of the `types` catalog, with RAML's inheritance,
//!   union, array, map and enum forms mapped onto embedding or type aliases
//! - a structure per JSON request/response body (`UsersIdGetReq`,
//!   `UsersIdGetResp`, ...)
//! - per top-level resource, either a server interface with its routes and a
//!   write-once implementation stub, or a client service
//!
//! ## Architecture
//!
//! - **[`spec`]** - RAML loading into an ordered, read-only model
//! - **[`generator`]** - classification, structure synthesis, resource
//!   scaffolding and template rendering
//! - **[`cli`]** - the `ramlgen` command line
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//!
//! ### Generation Flow
//!
//! ```text
//! ramlgen generate --spec api.raml
//!   → spec::load_api            RAML → ApiDefinition
//!   → generator::classify       declaration → StructureKind
//!   → generator::from_*         → StructureDescription / ResourceDescription
//!   → generator::Renderer       minijinja templates → files
//!   → generator::format_output  gofmt / rustfmt
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin ramlgen -- generate --spec api.raml --output generated
//! cargo run --bin ramlgen -- inspect --spec api.raml
//! ```
//!
//! Files named `*_api.go` / `*_api.rs` are written only once and belong to
//! the user afterwards; every other generated file is rewritten on each run.

pub mod cli;
pub mod generator;
pub mod logging;
pub mod spec;

pub use generator::{generate_from_spec, GenerateOptions, Generator};
pub use spec::{load_api, ApiDefinition};
