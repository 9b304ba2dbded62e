use clap::Parser;
use tracing::error;

use ledgerbot::cli::{check, run, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            if let Err(e) = run::execute(&args).await {
                // Logging may not be initialized if config loading failed.
                eprintln!("Error: {e}");
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        Commands::Check(CheckCommand::Config(arg)) => {
            if !check::execute_config(&arg.config) {
                std::process::exit(1);
            }
        }
    }
}
