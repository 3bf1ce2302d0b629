use clap::Parser;
use colored::*;
use dotenv::dotenv;
use log::{error, info, LevelFilter};
use std::error::Error;

mod app;
mod cli;
mod output;

use crate::cli::Args;
use onboard_core::client::OnboardClient;
use onboard_core::config::OnboardConfig;
use onboard_core::greeting;

/// Main function - connects to the assistant backend and runs the chat
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables before anything reads them
    dotenv().ok();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration from the default file location
    let config = OnboardConfig::load();

    // Get log level from config or use default; --verbose wins
    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        config
            .log_level
            .as_deref()
            .map(|level| match level.to_lowercase().as_str() {
                "trace" => LevelFilter::Trace,
                "debug" => LevelFilter::Debug,
                "info" => LevelFilter::Info,
                "warn" => LevelFilter::Warn,
                "error" => LevelFilter::Error,
                _ => LevelFilter::Info,
            })
            .unwrap_or(LevelFilter::Info)
    };

    // Initialize logger with configured log level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.to_string()),
    )
    .init();

    // CLI flags (and their env fallbacks) win over config-file values
    let config = config.merge(&OnboardConfig {
        api_base_url: args.api_url.clone(),
        employee_id: args.employee_id.clone(),
        log_level: None,
    });

    let client = OnboardClient::new(&config);
    info!("Using assistant backend at {}", client.base_url());

    // Probe the backend; degrade rather than abort, the greeting falls back
    if !client.check_health().await {
        eprintln!(
            "{}",
            format!(
                "Warning: backend at {} is not responding; replies will fail until it is up.",
                client.base_url()
            )
            .yellow()
        );
    }

    if args.interactive {
        // Fetch the proactive greeting exactly once, at session start
        let greeting = greeting::load(&client, config.employee_id()).await;

        if let Err(e) = app::run_interactive_chat(&client, greeting).await {
            error!("Error in interactive chat: {}", e);
            eprintln!("{}", format!("Interactive chat failed: {}", e).red());
        }
    } else if let Some(prompt) = args.prompt.clone() {
        if let Err(e) = app::run_single_query(prompt, &client).await {
            error!("Error processing prompt: {}", e);
            eprintln!("{}", format!("Query failed: {}", e).red());
        }
    } else {
        // No prompt and not interactive, show usage
        output::print_usage_instructions();
    }

    Ok(())
}
