mod build;
mod inspect;
mod list;
mod project;

pub use build::cmd_build;
pub use inspect::cmd_inspect;
pub use list::cmd_list;
pub use project::BundleArgs;
