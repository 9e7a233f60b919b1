//! CLI argument parsing and resolution into a pipeline configuration.

mod args;

pub use args::Args;
