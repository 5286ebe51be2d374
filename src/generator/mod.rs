//! # Generator Module
//!
//! Turns a parsed RAML definition into Go or Rust source files.
//!
//! ## Overview
//!
//! Three groups of artifacts are produced:
//! - **Types** - one structure per entry of the RAML `types` catalog
//! - **Bodies** - one structure per JSON request/response body, named after
//!   the resource path, verb and direction (`UsersIdGetResp`)
//! - **Resources** - per top-level resource, either a server interface plus
//!   an implementation stub, or a client service
//!
//! ## Architecture
//!
//! ```text
//! RAML → spec::ApiDefinition → classify → StructureDescription ─┐
//!                            └→ describe_resource → ResourceDescription ─┴→ Renderer → files
//! ```
//!
//! 1. **Classification** ([`classify`]) - decides which shape a declaration
//!    compiles to (inheritance, alias, map, plain struct, ...)
//! 2. **Synthesis** ([`from_declared_type`], [`from_body`]) - builds the
//!    template data, converting RAML types through a [`TypeConverter`]
//! 3. **Rendering** ([`Renderer`]) - minijinja templates, embedded per
//!    language and overridable from a directory
//!
//! ## Generated Layout
//!
//! ```text
//! generated/
//! ├── User.go            # one file per structure (user.rs for Rust)
//! ├── UsersGetResp.go
//! ├── users_if.go        # interface + routes, rewritten on every run
//! ├── users_api.go       # implementation stub, written once
//! └── mod.rs             # Rust only: module index
//! ```
//!
//! Client mode writes `users_service.go` instead of the `_if`/`_api` pair.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ramlgen::generator::{generate_from_spec, GenerateOptions};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = GenerateOptions::default();
//! let report = generate_from_spec(Path::new("api.raml"), &options)?;
//! println!("{} files written", report.written.len());
//! # Ok(())
//! # }
//! ```

mod body;
mod classify;
mod config;
mod format;
mod generate;
mod lang;
mod naming;
mod resource;
mod structure;
mod templates;

pub use body::*;
pub use classify::*;
pub use config::*;
pub use format::*;
pub use generate::*;
pub use lang::*;
pub use naming::*;
pub use resource::*;
pub use structure::*;
pub use templates::*;
