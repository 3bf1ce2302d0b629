use colored::*;
use onboard_core::format::{format_message, Span};
use onboard_core::greeting::Greeting;
use onboard_core::types::Message;

/// Render formatter spans into a terminal string
pub fn render_spans(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Plain(text) => out.push_str(text),
            Span::Bold(text) => out.push_str(&text.bold().to_string()),
            Span::Break => out.push('\n'),
        }
    }
    out
}

/// Print an assistant message with its suggestion chips, if any
pub fn print_assistant_message(message: &Message) {
    let rendered = render_spans(&format_message(&message.content));
    println!("{}: {}", "Assistant".blue().bold(), rendered);

    if !message.suggested_prompts.is_empty() {
        print_suggested_prompts(&message.suggested_prompts);
    }
}

/// Print suggestion chips as a numbered quick-reply list
pub fn print_suggested_prompts(prompts: &[String]) {
    for (i, prompt) in prompts.iter().enumerate() {
        println!("  {} {}", format!("[{}]", i + 1).yellow(), prompt.dimmed());
    }
    println!(
        "{}",
        "Type a chip number to pick a suggestion.".dimmed()
    );
}

/// Print the session-opening greeting banner
pub fn print_greeting(greeting: &Greeting) {
    let rendered = render_spans(&format_message(&greeting.text));
    println!("{}: {}", "Assistant".blue().bold(), rendered);

    if greeting.urgent_tasks_count > 0 {
        println!(
            "{}",
            format!(
                "{} task(s) are coming due — ask about them any time.",
                greeting.urgent_tasks_count
            )
            .yellow()
        );
    }
    println!();
}

/// Show usage instructions when no prompt or action is provided
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "onboard-cli \"your question\"".green().bold());
    println!("    Send a single question to the onboarding assistant");
    println!();
    println!("  {}", "onboard-cli -i".green().bold());
    println!("    Start an interactive chat session");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --api-url <URL>          Base URL of the assistant backend");
    println!("  --employee-id <ID>       Employee id used for the greeting");
    println!("  --help                   Show this help message");
    println!();
}
