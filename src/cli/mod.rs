pub mod commands;
pub mod core;
pub mod help;
pub mod output;
mod shell;
pub mod ui;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
