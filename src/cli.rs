//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Clinilead - lead capture backend for the clinic management landing site
#[derive(Parser)]
#[command(name = "clinilead")]
#[command(version)]
#[command(about = "Lead capture and admin dashboard backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// Without a subcommand the binary runs the HTTP server.
#[derive(Subcommand)]
pub enum Commands {
    /// Seed the default admin account if missing
    SeedAdmin,

    /// Reset an admin password
    ResetPassword {
        /// Admin email (default: the seed account)
        #[arg(long)]
        email: Option<String>,

        /// New password
        #[arg(long)]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,
    },
}
