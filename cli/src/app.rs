use anyhow::{Context, Result};
use colored::*;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::io::{self, Write};
use std::time::Duration;

use crate::output::{print_assistant_message, print_greeting};
use onboard_core::client::OnboardClient;
use onboard_core::greeting::Greeting;
use onboard_core::session::{run_turn, ChatSession, TurnOutcome};
use onboard_core::types::Role;

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap(),
    );
    spinner.set_message("Waiting for the assistant...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Runs a single query mode, sending one question on a fresh session and
/// displaying the reply
pub async fn run_single_query(prompt: String, client: &OnboardClient) -> Result<()> {
    info!("Running single query: {}", prompt);

    let mut session = ChatSession::new();
    let spinner = spinner();
    let outcome = run_turn(&mut session, client, &prompt).await;
    spinner.finish_and_clear();

    if outcome == TurnOutcome::Rejected {
        println!("Nothing to send.");
        return Ok(());
    }
    if let Some(message) = session.messages().last() {
        print_assistant_message(message);
    }

    Ok(())
}

/// Runs an interactive chat session against the assistant backend
pub async fn run_interactive_chat(client: &OnboardClient, greeting: Greeting) -> Result<()> {
    println!("Starting interactive chat with the onboarding assistant.");
    println!("Type 'exit' or 'quit' to end the session, 'clear' to start over.");
    println!();

    print_greeting(&greeting);

    let mut session = ChatSession::new();

    loop {
        // Prompt for user input
        print!("{}: ", "You".green().bold());
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read input")?;

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        // Check for exit command
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Exiting chat session.");
            break;
        }

        // Reset the conversation. The greeting belongs to the session start
        // and is not fetched again.
        if input.eq_ignore_ascii_case("clear") {
            session.clear();
            println!("Conversation cleared.");
            println!();
            continue;
        }

        let Some(text) = resolve_input(input, &mut session)? else {
            continue; // chip selection declined
        };

        debug!("Sending chat message: {}", text);
        let spinner = spinner();
        run_turn(&mut session, client, &text).await;
        spinner.finish_and_clear();

        if let Some(message) = session.messages().last() {
            if message.role == Role::Assistant {
                print_assistant_message(message);
            }
        }

        println!(); // Add spacing between interactions
    }

    Ok(())
}

/// Maps a bare chip number to its suggested prompt. Selection only stages
/// the text; the user confirms before it is sent. Anything that is not a
/// valid chip number is treated as a plain message.
fn resolve_input(input: &str, session: &mut ChatSession) -> Result<Option<String>> {
    let chips = session
        .messages()
        .last()
        .filter(|m| m.role == Role::Assistant)
        .map(|m| m.suggested_prompts.clone())
        .unwrap_or_default();

    let selected = input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| chips.get(i).cloned());

    let Some(prompt) = selected else {
        return Ok(Some(input.to_string()));
    };

    session.select_suggestion(prompt.clone());
    let confirmed = Confirm::new()
        .with_prompt(format!("Send \"{}\"?", prompt))
        .default(true)
        .interact()
        .context("Failed to read confirmation")?;

    let draft = session.take_draft();
    Ok(if confirmed { draft } else { None })
}
