//! linux-remote - Entry point
//!
//! Parses CLI arguments, runs one command on the remote host, prints the
//! captured output, and mirrors the remote exit status as the process exit
//! code.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use linux_remote::config::{Args, Config};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout stays the remote command's output.
    // Warnings only unless RUST_LOG says otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let args = Args::parse();

    // Validate and create config
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    info!(
        "linux-remote v{} running `{}` as {}@{}:{}",
        env!("CARGO_PKG_VERSION"),
        config.command,
        config.user,
        config.host,
        config.port
    );

    let server = config.build_server();

    let result = match server.run_command(&config.command).await {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(255);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize result: {}", e);
                return ExitCode::from(255);
            }
        }
    } else {
        print!("{}", result.stdout);
        eprint!("{}", result.stderr);
    }

    // ssh(1) convention: the remote status becomes the process status;
    // 255 above is reserved for transport failures.
    ExitCode::from(result.exit_status.unwrap_or(0) as u8)
}
