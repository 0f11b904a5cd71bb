//! envbuild — render `.env` from a parameter-store namespace.
//!
//! # Usage
//!
//! ```text
//! envbuild build --environment <name> [--base-dir <dir>] [--dry-run] [--strict]
//!                [--values escape|reject|verbatim] [--max-pages <n>]
//!                [--with-decryption] [--region <region>]
//! envbuild diff  --environment <name> [same options]
//! ```
//!
//! Every option also reads an environment variable (`ENVIRONMENT`,
//! `BASE_DIR`, `ENVBUILD_*`), so the tool drops into CI steps unchanged.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{build::BuildArgs, diff::DiffArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "envbuild",
    version,
    about = "Build a .env file from parameter-store values for an environment",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render .env.template and write .env.
    Build(BuildArgs),

    /// Show a unified diff of what build would write.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build(args) => args.run().await,
        Commands::Diff(args) => args.run().await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
