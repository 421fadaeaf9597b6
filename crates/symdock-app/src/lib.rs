//! symdock headless shell
//!
//! Loads a configuration and an expression document, drives a session and
//! reports the emitted editor state as JSON.

mod app;
mod cli;

pub use app::{AppError, Report, run, run_to_json};
pub use cli::CliArgs;
