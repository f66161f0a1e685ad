// file: src/main.rs
// version: 2.0.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! provision-networking - Main entry point

use clap::Parser;
use provision_networking::{
    cli::{exit_code, run_command, Cli},
    logging::logger,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_logger(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Metadata downloads may sit in retries; let Ctrl+C cut them short
    let shutdown_signal = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        warn!("Received Ctrl+C, aborting");
    };

    let result = tokio::select! {
        result = run_command(&cli) => result,
        _ = shutdown_signal => std::process::exit(130),
    };

    match result {
        Ok(_) => {
            if !cli.quiet {
                println!(
                    "Configuration files written to root filesystem '{}'",
                    cli.rootfs.display()
                );
            }
        }
        Err(err) => {
            if !cli.quiet {
                eprintln!("Error: {:#}", err);
            }
            std::process::exit(exit_code(&err));
        }
    }
}
