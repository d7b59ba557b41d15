use clap::{Parser, Subcommand};
use pkg_cluster::{ClusterReader, connect};
use pkg_diff::ExternalProgram;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod diff;
mod get;
mod print;
#[cfg(test)]
mod testutil;

use config::GlobalArgs;

/// Log filter when RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "kubectl-revisions",
    about = "Time-travel through your workload revision history"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get the revision history of a Deployment, StatefulSet or DaemonSet
    Get(get::GetArgs),
    /// Compare two revisions of a Deployment, StatefulSet or DaemonSet
    #[command(alias = "why")]
    Diff(diff::DiffArgs),
    /// Print the version of kubectl-revisions
    Version,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn version() -> String {
    format!("kubectl-revisions {}", env!("CARGO_PKG_VERSION"))
}

/// Connect with the global flags, returning the reader and namespace.
async fn connect_cluster(global: &GlobalArgs) -> anyhow::Result<(Arc<dyn ClusterReader>, String)> {
    let connection = connect(&global.connect_options()).await?;
    info!("Using namespace {}", connection.namespace);
    Ok((Arc::new(connection.cluster), connection.namespace))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Get(args) => {
            let (client, namespace) = connect_cluster(&cli.global).await?;
            let mut out = std::io::stdout().lock();
            get::run(client, &namespace, args, &mut out).await?;
        }
        Commands::Diff(args) => {
            let (client, namespace) = connect_cluster(&cli.global).await?;
            let program = ExternalProgram::from_env();
            debug!("Diff program: {} {:?}", program.command(), program.args());
            let mut err_out = std::io::stderr();
            let status = diff::run(
                client,
                &namespace,
                args,
                Box::new(program),
                None,
                &mut err_out,
            )
            .await?;
            debug!("Diff finished: {:?}", status);
        }
        Commands::Version => println!("{}", version()),
    }

    Ok(())
}
