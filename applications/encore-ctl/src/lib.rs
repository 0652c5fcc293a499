//! Encore command-line tool library
//!
//! Configuration, errors and subcommand implementations for `encore-ctl`,
//! exposed for testing.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::SavedState;
pub use config::CtlConfig;
pub use error::{CtlError, Result};
