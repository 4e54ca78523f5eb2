use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "endpoint-authz")]
#[command(version, about = "Endpoint-to-resource mapping inspector", long_about = None)]
struct Cli {
    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = app_utils::logging::DEFAULT_FILTER)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover resources and actions from a config's route table
    Discover {
        /// Path to the YAML or TOML config file
        file: String,

        /// Print sync records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a request path to its resource
    Resolve {
        /// Path to the YAML or TOML config file
        file: String,

        /// Concrete request path, e.g. /accounts/42
        path: String,
    },
    /// Validate declarations and report templates an earlier binding answers first
    Check {
        /// Path to the YAML or TOML config file
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    app_utils::logging::init(&cli.log)?;

    match cli.command {
        Commands::Discover { file, json } => {
            commands::discover::run(&file, json)?;
        }
        Commands::Resolve { file, path } => {
            commands::resolve::run(&file, &path)?;
        }
        Commands::Check { file } => {
            commands::check::run(&file)?;
        }
    }

    Ok(())
}
