//! Terminal client for the dualtone service.
//!
//! ```text
//! dualtone generate "Explain the theory of relativity"
//! dualtone history
//! ```

use clap::{Parser, Subcommand};
use dualtone::client::{self, ApiClient, DEFAULT_BACKEND_URL, MOCK_USER_ID};
use dualtone::telemetry::{get_subscriber, init_subscriber};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "dualtone",
    version,
    about = "Get a casual and a formal explanation of any topic"
)]
struct Cli {
    /// Base URL of the dualtone service
    #[arg(long, env = "DUALTONE_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,
    /// Identity sent with every request
    #[arg(long, default_value = MOCK_USER_ID)]
    user_id: String,
    /// Seconds to wait for a generation
    #[arg(long, default_value_t = 120)]
    generate_timeout: u64,
    /// Seconds to wait for the history listing
    #[arg(long, default_value_t = 10)]
    history_timeout: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate both explanations of a topic
    Generate {
        /// Topic or question; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List past interactions, most recent first
    History,
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let api = ApiClient::new(
        &cli.backend_url,
        Duration::from_secs(cli.generate_timeout),
        Duration::from_secs(cli.history_timeout),
    )?;

    match cli.command {
        Commands::Generate { query } => {
            let query = query.join(" ");
            let responses = api.generate(&cli.user_id, &query).await?;
            print!("{}", client::render_responses(&query, &responses));
        }
        Commands::History => {
            let items = api.history(&cli.user_id).await?;
            print!("{}", client::render_history(&items));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = get_subscriber("dualtone-cli".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    if let Err(err) = execute(Cli::parse()).await {
        eprintln!("An error occurred: {}", err);
        std::process::exit(1);
    }
}
