//! ProMag webhook client CLI.
//!
//! Exercises each dashboard operation against the configured upstream:
//! project submission, selection decisions, task listing, the member
//! directory, and a polling watch mode.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use promag_client::api::types::{Decision, ProjectSubmission};
use promag_client::config::loader::{default_config, load_config};
use promag_client::config::schema::ClientConfig;
use promag_client::lifecycle::Shutdown;
use promag_client::monitor::tasks::TaskMonitor;
use promag_client::observability::{logging, metrics};
use promag_client::DashboardClient;

#[derive(Parser)]
#[command(name = "promag-client")]
#[command(about = "Client for the ProMag project dashboard webhooks", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a project for AI evaluation
    Create {
        #[arg(long)]
        project_name: String,
        #[arg(long)]
        problem_statement: String,
        #[arg(long)]
        purpose: String,
        #[arg(long)]
        expected_output: String,
        #[arg(long)]
        target_audience: String,
        #[arg(long, default_value = "")]
        extra_add_ons: String,
    },
    /// Send the reviewer decision for an evaluated project
    Select {
        project_name: String,
        /// Reject the project instead of proceeding
        #[arg(long)]
        reject: bool,
    },
    /// List the current tasks for a project
    Tasks { project_name: String },
    /// Show the member directory
    Members,
    /// Poll the task list and print every change until Ctrl+C
    Watch { project_name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };
    logging::init_logging(&config.observability.log_level);

    tracing::debug!(
        origin = %config.upstream.origin,
        primary = %config.upstream.primary_namespace,
        fallback = %config.upstream.fallback_namespace,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    let client = DashboardClient::new(&config)?;

    match cli.command {
        Commands::Create {
            project_name,
            problem_statement,
            purpose,
            expected_output,
            target_audience,
            extra_add_ons,
        } => {
            let submission = ProjectSubmission {
                project_name,
                problem_statement,
                purpose,
                expected_output,
                target_audience,
                extra_add_ons,
            };
            let report = client.submit_project(&submission).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Select {
            project_name,
            reject,
        } => {
            let decision = if reject {
                Decision::Reject
            } else {
                Decision::Proceed
            };
            client.confirm_selection(&project_name, decision).await?;
            println!("Recorded {:?} for {}", decision, project_name);
        }
        Commands::Tasks { project_name } => {
            let tasks = client.tasks(&project_name).await?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        Commands::Members => {
            let members = client.members().await?;
            println!("{}", serde_json::to_string_pretty(members.as_ref())?);
        }
        Commands::Watch { project_name } => {
            watch(config, client, project_name).await?;
        }
    }

    Ok(())
}

/// Run the task monitor until Ctrl+C, printing each new snapshot.
async fn watch(
    config: ClientConfig,
    client: DashboardClient,
    project_name: String,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let shutdown = Shutdown::new();
    let (monitor, mut snapshots) = TaskMonitor::new(
        Arc::new(client),
        project_name,
        Duration::from_secs(config.polling.interval_secs),
    );
    let monitor_handle = tokio::spawn(monitor.run(shutdown.subscribe()));

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(tasks) = snapshot {
                    println!("{}", serde_json::to_string_pretty(&tasks)?);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received, shutting down");
                shutdown.trigger();
                break;
            }
        }
    }

    let _ = monitor_handle.await;
    tracing::info!("Shutdown complete");
    Ok(())
}
