//! # CLI Module
//!
//! Command-line interface of the `ramlgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate structures and resource scaffolding from a RAML file:
//!
//! ```bash
//! ramlgen generate --spec api.raml --output generated --language go
//! ```
//!
//! Options:
//! - `--spec <FILE>` - Path to the RAML file (required)
//! - `--output <DIR>` - Output directory (default: `generated`)
//! - `--language <go|rust>` - Target language (default: `go`)
//! - `--package <NAME>` - Package / module name of the generated files
//! - `--kind <server|client>` - What to scaffold per resource (default: `server`)
//! - `--only <PARTS>` - Any of `types,bodies,resources`
//! - `--template-dir <DIR>` - Template overrides
//! - `--config <FILE>` - Config file (default: `ramlgen.toml` next to the RAML file)
//! - `--no-format` - Skip gofmt / rustfmt
//!
//! ### `inspect`
//!
//! Print the classification of every catalog type, the body structure names
//! and the routes of every resource without writing anything:
//!
//! ```bash
//! ramlgen inspect --spec api.raml
//! ramlgen inspect --spec api.raml --language rust --json
//! ```
//!
//! ## Logging
//!
//! `--log-level` sets the default level; `RUST_LOG` overrides it and
//! `RAMLGEN_LOG_FORMAT=json` switches to JSON output.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{inspect_json, inspect_report, run, run_cli, Cli, Commands, OnlyPart};
