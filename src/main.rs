use clap::Parser;
use tracing::error;

use clinilead::cli::Cli;
use clinilead::config::{get_config, init_config};
use clinilead::runtime::modes::{run_cli_command, run_server};
use clinilead::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_config();
    let config = get_config();
    // Guard must stay alive for the process lifetime or file logs are lost
    let _logging_guard = init_logging(&config);

    match cli.command {
        Some(command) => {
            if let Err(e) = run_cli_command(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            if let Err(e) = run_server().await {
                error!("Server exited with error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
