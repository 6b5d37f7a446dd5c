//! pdebundle-lib: package a project directory as a module bundle
//!
//! Turns a project that has already been compiled in place into the archive a
//! normal export would produce, without running a build:
//! - `build_properties`: `bin.includes` resources and mapped libraries
//! - `classpath`: compiled output directories merged at the bundle root
//! - `archive`: duplicate-free, stored, reproducible ZIP assembly with nested archives
//! - `bundle`: the two-pass assembly of a whole project
//! - `location`: `eclipse-project:` locations read on demand

pub mod archive;
pub mod build_properties;
pub mod bundle;
pub mod classpath;
pub mod consts;
pub mod error;
pub mod location;
pub mod options;
pub mod util;

pub use bundle::{Bundle, BundleBuilder, BundleEntry, assemble, assemble_with};
pub use error::{Error, ErrorKind};
pub use options::BundleOptions;

/// Result type for bundle operations
pub type Result<T> = std::result::Result<T, Error>;
