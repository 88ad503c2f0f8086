//! CLI mode
//!
//! Maintenance commands that run against the configured database and exit.

use std::fmt;
use std::io::Read;

use colored::Colorize;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::runtime::lifetime::startup::{DEFAULT_ADMIN_EMAIL, seed_default_admin};
use crate::storage::StorageFactory;
use crate::utils::password::hash_password;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    pub fn format_colored(&self) -> String {
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::ClinileadError> for CliError {
    fn from(err: crate::errors::ClinileadError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Config { action } => run_config_command(action),
        Commands::SeedAdmin => {
            let storage = connect().await?;
            seed_default_admin(&storage)
                .await
                .map_err(|e| CliError::CommandError(e.to_string()))?;
            println!("{}", "Default admin account ensured".green());
            Ok(())
        }
        Commands::ResetPassword {
            email,
            password,
            stdin,
        } => {
            let email = email.unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
            let password = read_password(password, stdin)?;
            reset_password(&email, &password).await
        }
    }
}

fn run_config_command(action: ConfigCommands) -> Result<(), CliError> {
    match action {
        ConfigCommands::Generate { output_path } => {
            let path = output_path.unwrap_or_else(|| "config.example.toml".to_string());
            let sample = StaticConfig::generate_sample_config();
            std::fs::write(&path, sample)
                .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;
            println!("{} {}", "Sample config written to".green(), path);
            Ok(())
        }
    }
}

async fn connect() -> Result<std::sync::Arc<crate::storage::SeaOrmStorage>, CliError> {
    let _ = rustls::crypto::ring::default_provider().install_default();
    StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))
}

fn read_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    let password = if stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::CommandError(format!("Failed to read stdin: {}", e)))?;
        buf.trim().to_string()
    } else {
        password.ok_or_else(|| {
            CliError::CommandError("Provide a password with --password or --stdin".to_string())
        })?
    };

    if password.len() < 4 {
        return Err(CliError::CommandError(
            "Password must be at least 4 characters".to_string(),
        ));
    }
    Ok(password)
}

async fn reset_password(email: &str, password: &str) -> Result<(), CliError> {
    let storage = connect().await?;

    let Some(admin) = storage.find_admin_by_email(email).await? else {
        return Err(CliError::CommandError(format!(
            "No admin account with email {}",
            email
        )));
    };

    let hashed = hash_password(password)
        .map_err(|e| CliError::CommandError(format!("Failed to hash password: {}", e)))?;
    storage.upsert_admin(&admin.email, &admin.name, &hashed).await?;

    println!("{} {}", "Password updated for".green(), email);
    Ok(())
}
