//! RAML 1.0 model and loader.
//!
//! Only the subset of RAML the generators consume is modelled: the type
//! catalog, the resource tree, methods and their JSON bodies.

mod build;
mod load;
mod types;

pub use build::*;
pub use load::*;
pub use types::*;
