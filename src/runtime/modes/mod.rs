//! Mode routing
//!
//! The binary runs the HTTP server by default; subcommands run maintenance
//! tasks and exit.

pub mod cli;
pub mod server;

pub use cli::run_cli_command;
pub use server::run_server;
