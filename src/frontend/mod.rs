//! Frontend components
//!
//! Configuration, input loading and the command line interface.

pub mod cli;
pub mod config;
pub mod loader;

pub use cli::{main as cli_main, run_check, run_generate, run_init_config, write_artifacts};
pub use config::{Config, LogSettings, OutputConfig};
pub use loader::{load_api, parse_api};
