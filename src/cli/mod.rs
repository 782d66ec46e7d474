//! Command-line interface
//!
//! There are no subcommands: the binary polls until interrupted, and the
//! flags only choose configuration, verbosity, or a one-shot/dry run.

pub mod config_merger;
pub mod executor;
pub mod parser;
pub mod validation;

pub use config_merger::load_settings;
pub use executor::{build_scheduler, execute};
pub use parser::{Cli, Environment};
