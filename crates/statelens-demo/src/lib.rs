#![forbid(unsafe_code)]

//! Command-line demo of a two-counter selector graph.

pub mod cli;
pub mod error;
pub mod scenario;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
