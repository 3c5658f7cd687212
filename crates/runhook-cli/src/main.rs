//! runhook CLI - job payload normalization and failed run inspection.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use runhook_client::{BlockingJobsClient, ClientConfig, ClientError, JobsClient};
use runhook_core::{
    extract_failed_task_errors, extract_failed_task_errors_async, normalize_content,
    validate_trigger_event, Content, FailedTaskRecord, RunId, RunInfo, RunState,
};

/// runhook CLI - Jobs API helper tool
#[derive(Parser)]
#[command(name = "runhook")]
#[command(about = "Normalize job payloads and inspect failed Jobs API runs", long_about = None)]
struct Cli {
    /// Jobs API host (overrides RUNHOOK_HOST)
    #[arg(long, global = true)]
    host: Option<String>,

    /// Bearer token (overrides RUNHOOK_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a JSON payload so every leaf is a string or a boolean
    Normalize {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },

    /// Validate a trigger event and print its run state
    #[command(name = "validate-event")]
    ValidateEvent {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },

    /// Print error records for the failed sub-tasks of a run
    #[command(name = "failed-tasks")]
    FailedTasks {
        /// Run ID
        #[arg(long)]
        run_id: i64,

        /// Use the blocking client instead of the async one
        #[arg(long)]
        blocking: bool,
    },

    /// Normalize a payload and submit it as a one-time run
    Submit {
        /// Input file, stdin when omitted
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = client_config(cli.host, cli.token);

    match cli.command {
        Commands::Normalize { file } => {
            normalize(file.as_deref())?;
        }
        Commands::ValidateEvent { file } => {
            validate_event(file.as_deref())?;
        }
        Commands::FailedTasks { run_id, blocking } => {
            failed_tasks(config, RunId::new(run_id), blocking).await?;
        }
        Commands::Submit { file } => {
            submit(config, file.as_deref()).await?;
        }
    }

    Ok(())
}

fn client_config(host: Option<String>, token: Option<String>) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(token) = token {
        config = config.with_token(token);
    }
    config
}

fn read_json(file: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

fn normalize(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let content = Content::from(read_json(file)?);
    let normalized = normalize_content(&content)?;
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

fn validate_event(file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let event = read_json(file)?;
    let state = validate_trigger_event(&event)?;
    debug!(life_cycle_state = ?state.life_cycle_state, "Trigger event is valid");
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

async fn failed_tasks(
    config: ClientConfig,
    run_id: RunId,
    blocking: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = if blocking {
        tokio::task::spawn_blocking(move || failed_tasks_blocking(&config, run_id)).await??
    } else {
        let client = JobsClient::new(&config)?;
        let run = client.get_run(run_id).await?;
        let state = run_state(&run, run_id)?;
        extract_failed_task_errors_async(&client, &run, &state).await?
    };

    info!(run_id = %run_id, failed = records.len(), "Extracted failed tasks");
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn failed_tasks_blocking(
    config: &ClientConfig,
    run_id: RunId,
) -> Result<Vec<FailedTaskRecord>, ClientError> {
    let client = BlockingJobsClient::new(config)?;
    let run = client.get_run(run_id)?;
    let state = run_state(&run, run_id)?;
    Ok(extract_failed_task_errors(&client, &run, &state)?)
}

fn run_state(run: &RunInfo, run_id: RunId) -> Result<RunState, ClientError> {
    run.state
        .clone()
        .ok_or_else(|| ClientError::Serialization(format!("run {run_id} has no state")))
}

async fn submit(config: ClientConfig, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let payload = Content::from(read_json(file)?);
    let client = JobsClient::new(&config)?;
    let run_id = client.submit_run(&payload).await?;

    info!(run_id = %run_id, "Run submitted");
    println!("{}", run_id);
    Ok(())
}
