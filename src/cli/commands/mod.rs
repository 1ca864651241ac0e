//! CLI command implementations.

mod list;
mod probe;
mod run;

pub use list::run_list;
pub use probe::run_probe;
pub use run::run_pipeline;
