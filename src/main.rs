//! planagent - agentic event planning assistant
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use planagent::agent::{CancelToken, PlannerSession, SessionOutcome};
use planagent::cli::{Cli, Command, OutputFormat};
use planagent::config::Config;
use planagent::llm::create_client;
use planagent::places::LocationIqClient;
use planagent::schedule::{generate_feasible_slots, parse_date, validate_range};
use planagent::tools::{ToolContext, ToolExecutor};

fn setup_logging(verbose: bool) -> Result<()> {
    // Log to a file under the XDG data dir - the console belongs to the
    // conversation.
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("planagent")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("planagent.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "planagent loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Command::Plan { request, max_turns } => cmd_plan(config, request, max_turns).await,
        Command::Slots {
            start_date,
            end_date,
            duration,
            format,
        } => cmd_slots(&config, &start_date, end_date.as_deref(), duration, format),
        Command::Tools => cmd_tools(),
    }
}

/// Run an interactive planning session
async fn cmd_plan(mut config: Config, request: Option<String>, max_turns: Option<usize>) -> Result<()> {
    config.validate()?;

    if let Some(turns) = max_turns {
        config.session.max_turns = turns;
    }

    let llm = create_client(&config.llm).map_err(|e| eyre::eyre!("Failed to create LLM client: {}", e))?;
    let places = Arc::new(LocationIqClient::from_config(&config.places));

    let cancel = CancelToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let tools = ToolExecutor::standard();
    let ctx = ToolContext::new(
        uuid::Uuid::now_v7().to_string(),
        llm.clone(),
        places,
        config.schedule.clone(),
        config.budget.clone(),
    );

    let mut session = PlannerSession::new(llm, tools, ctx, config.session.clone(), &config.llm, cancel);

    info!(session_id = %session.id(), "Starting planning session");
    let outcome = session.run_interactive(request).await?;

    if matches!(outcome, SessionOutcome::Failed { .. }) {
        std::process::exit(1);
    }

    Ok(())
}

/// Generate and print feasible slots directly
fn cmd_slots(
    config: &Config,
    start_date: &str,
    end_date: Option<&str>,
    duration: f64,
    format: OutputFormat,
) -> Result<()> {
    let start = parse_date(start_date)?;
    let end = match end_date {
        Some(value) => parse_date(value)?,
        None => start,
    };
    validate_range(start, end, duration)?;

    let slots = generate_feasible_slots(start, end, duration, &config.schedule.working_hours());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        OutputFormat::Text => {
            if slots.is_empty() {
                println!("No feasible slots for a {duration}h event in those working hours.");
                return Ok(());
            }
            for slot in &slots {
                println!(
                    "{} {}-{}",
                    slot.date,
                    slot.start_time.format("%H:%M"),
                    slot.end_time.format("%H:%M")
                );
            }
        }
    }

    Ok(())
}

/// List the registered planning tools
fn cmd_tools() -> Result<()> {
    let executor = ToolExecutor::standard();

    for def in executor.definitions() {
        println!("{}", def.name.bold());
        println!("  {}", def.description);
    }

    Ok(())
}
