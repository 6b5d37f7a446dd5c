//! Well-known names and limits used while assembling a bundle.

/// Dependency/output-mapping descriptor, relative to the project root.
pub const CLASSPATH_FILENAME: &str = ".classpath";

/// Build-instruction descriptor, relative to the project root.
pub const BUILD_PROPERTIES_FILENAME: &str = "build.properties";

/// Key holding the comma-separated inclusion list.
pub const BIN_INCLUDES_KEY: &str = "bin.includes";

/// Prefix of the per-entry output mapping key (`output.<entry>`).
pub const OUTPUT_KEY_PREFIX: &str = "output.";

/// Inclusion list used when `build.properties` is absent.
pub const DEFAULT_BIN_INCLUDES: &str = "META-INF,.";

/// Inclusion entry denoting the project root.
pub const ROOT_ENTRY: &str = ".";

/// Suffix marking a target path as a nested archive.
pub const NESTED_ARCHIVE_SUFFIX: &str = ".jar";

/// Maximum directory nesting followed below any single source directory.
pub const MAX_RECURSE_DEPTH: usize = 256;

/// URL scheme naming a project directory to be bundled on demand.
pub const URL_SCHEME: &str = "eclipse-project";

/// Environment variable overriding [`MAX_RECURSE_DEPTH`].
pub const ENV_MAX_DEPTH: &str = "PDEBUNDLE_MAX_DEPTH";

/// Environment variable overriding the nested archive suffixes (comma separated).
pub const ENV_NESTED_SUFFIXES: &str = "PDEBUNDLE_NESTED_SUFFIXES";
