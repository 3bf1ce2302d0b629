use clap::Parser;

/// Terminal client for the employee onboarding assistant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// A single question to send; prints the reply and exits
    #[arg(index = 1)] // Positional argument
    pub prompt: Option<String>,

    /// Enter interactive chat mode
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Base URL of the assistant backend
    #[arg(long, env = "ONBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Employee identifier used for the proactive greeting
    #[arg(long, env = "ONBOARD_EMPLOYEE_ID")]
    pub employee_id: Option<String>,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
