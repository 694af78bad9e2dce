use std::io;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use eyre::Result;
use nexus_expert_cli::cli::chat::scenario::Scenario;
use nexus_expert_cli::cli::chat::{print_placeholder_panel, ChatContext};
use nexus_expert_cli::gemini_client::ExpertClient;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input to send to the chat, then exit
    #[arg(short, long)]
    input: Option<String>,

    /// Which AI scenario to demo; only `expert` is interactive
    #[arg(short, long, value_enum, default_value = "expert")]
    scenario: Scenario,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if !cli.scenario.is_interactive() {
        let mut stdout = io::stdout();
        print_placeholder_panel(&mut stdout, cli.scenario)?;
        return Ok(ExitCode::SUCCESS);
    }

    let client = ExpertClient::from_env();
    if client.is_demo_mode() {
        info!("No API key configured, running in demo mode");
    }

    info!("Starting Nexus AI Expert chat");

    let interactive = cli.input.is_none();
    let mut chat_context = ChatContext::new(
        Box::new(io::stdout()),
        cli.input,
        interactive,
        client,
    );
    chat_context.run().await
}
