//! Google Scholar CLI - Entry Point
//!
//! Runs the four search operations from the command line, printing either
//! human-readable text or the full JSON entities.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gscholar_tools::models::{AuthorSearchArgs, CitationsArgs, ProfileArgs, SearchArgs};
use gscholar_tools::{Config, SerpApiClient, formatters, tools};

#[derive(Parser, Debug)]
#[command(name = "gscholar")]
#[command(about = "Search Google Scholar via SerpAPI")]
#[command(version)]
struct Cli {
    /// SerpAPI key (required for all operations)
    #[arg(long, env = "SERPAPI_KEY")]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for papers
    Search {
        /// Search query
        query: String,

        /// Maximum papers to return (1-20)
        #[arg(long, short = 'n', default_value = "5")]
        num: i64,

        /// Only papers published from this year onwards
        #[arg(long)]
        year_from: Option<i32>,

        /// Only papers published until this year
        #[arg(long)]
        year_to: Option<i32>,

        /// Print the full JSON entity instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List papers citing a given paper
    Citations {
        /// Citation ID from a previous search result
        citation_id: String,

        /// Maximum citing papers to return (1-20)
        #[arg(long, short = 'n', default_value = "5")]
        num: i64,

        /// Print the full JSON entity instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Search for author profiles by name
    Author {
        /// Author name
        name: String,

        /// Print the full JSON entity instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Show an author's full profile by ID
    Profile {
        /// Google Scholar author ID (e.g. "JicYPdAAAAAJ")
        author_id: String,

        /// Print the full JSON entity instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let config = Config::new(cli.api_key);
    let client = SerpApiClient::new(config)?;

    match cli.command {
        Command::Search { query, num, year_from, year_to, json } => {
            let args = SearchArgs { query, num_results: num, year_from, year_to };
            let result = tools::run_search(&client, &args).await;
            if json {
                println!("{}", formatters::to_json(&result)?);
            } else {
                println!("{}", formatters::format_search(&result));
            }
        }
        Command::Citations { citation_id, num, json } => {
            let args = CitationsArgs { citation_id, num_results: num };
            let result = tools::run_citations(&client, &args).await;
            if json {
                println!("{}", formatters::to_json(&result)?);
            } else {
                println!("{}", formatters::format_citations(&result));
            }
        }
        Command::Author { name, json } => {
            let args = AuthorSearchArgs { author_name: name };
            let result = tools::run_author_search(&client, &args).await;
            if json {
                println!("{}", formatters::to_json(&result)?);
            } else {
                println!("{}", formatters::format_author_search(&result));
            }
        }
        Command::Profile { author_id, json } => {
            let args = ProfileArgs { author_id };
            let result = tools::run_profile(&client, &args).await;
            if json {
                println!("{}", formatters::to_json(&result)?);
            } else {
                println!("{}", formatters::format_profile(&result));
            }
        }
    }

    Ok(())
}
