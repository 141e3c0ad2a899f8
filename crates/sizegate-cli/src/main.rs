//! sizegate — run files through the upload size gate from the command line.
//!
//! Configuration comes from SIZEGATE_* environment variables (or a .env file,
//! loaded by `SizeGateConfig::from_env`).

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sizegate_cli::{build_gate, descriptor_for, init_tracing, print_json};
use sizegate_core::{SizeGateConfig, UploadDescriptor};

#[derive(Parser)]
#[command(name = "sizegate", about = "Reject uploaded images below minimum dimensions")]
struct Cli {
    /// Minimum width override, sanitized like the settings form
    #[arg(long, global = true)]
    min_width: Option<String>,
    /// Minimum height override, sanitized like the settings form
    #[arg(long, global = true)]
    min_height: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more files as independent uploads
    Check {
        /// Paths of the files to check
        #[arg(required = true)]
        files: Vec<std::path::PathBuf>,
    },
    /// Print the rendered settings page
    Settings,
}

#[derive(Serialize)]
struct CheckReport {
    accepted: bool,
    descriptor: UploadDescriptor,
}

fn main() -> anyhow::Result<()> {
    // --help and usage errors must not depend on the environment being valid
    let cli = Cli::parse();

    // Loads .env first, so RUST_LOG from the file reaches the subscriber
    let config = SizeGateConfig::from_env().context("Failed to load configuration")?;
    init_tracing();
    let gate = build_gate(&config, cli.min_width.as_deref(), cli.min_height.as_deref())?;

    match cli.command {
        Commands::Check { files } => {
            let reports: Vec<CheckReport> = files
                .iter()
                .map(|path| {
                    let descriptor = gate.check(descriptor_for(path));
                    CheckReport {
                        accepted: !descriptor.is_rejected(),
                        descriptor,
                    }
                })
                .collect();
            let rejected = reports.iter().filter(|r| !r.accepted).count();
            print_json(&reports)?;
            if rejected > 0 {
                tracing::info!(rejected, total = reports.len(), "Some uploads were rejected");
                std::process::exit(1);
            }
        }
        Commands::Settings => {
            print!("{}", gate.render_settings_page());
        }
    }

    Ok(())
}
