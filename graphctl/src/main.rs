use clap::{Args, Parser, Subcommand};
use graph_batch::{Catalog, GraphClient, Profile, StaticToken, reconcile};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

mod config;

use config::Config;

/// Environment variable read when `--token` is not given.
const TOKEN_ENV: &str = "GRAPH_ACCESS_TOKEN";

#[derive(Parser)]
#[command(name = "graphctl", about = "Fetch social graph profiles in one batch call")]
struct Cli {
    /// YAML config file. Built-in defaults are used when omitted.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Fetch a profile and print it as JSON
    Fetch {
        #[command(flatten)]
        query: QueryArgs,
        /// Access token; falls back to GRAPH_ACCESS_TOKEN
        #[arg(long)]
        token: Option<String>,
    },
    /// Reconcile a saved batch response offline
    Reconcile {
        #[command(flatten)]
        query: QueryArgs,
        /// File holding the raw batch response
        input: PathBuf,
    },
    /// Print the login URL that starts the OAuth flow
    AuthorizeUrl {
        #[arg(long)]
        state: String,
    },
    /// List the configured query presets
    Presets,
}

#[derive(Args)]
struct QueryArgs {
    #[arg(long, default_value = Catalog::FULL)]
    query: String,
}

#[derive(Serialize)]
struct Output<'a> {
    profile: &'a Profile,
    diagnostics: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let _logging = shared::logging::init(
        &config.logging.level,
        config.logging.sentry_dsn.as_deref(),
    )?;

    tracing::debug!(endpoint = %config.graph.endpoint, "configuration loaded");

    if let Some(metrics) = &config.metrics {
        shared::metrics::install_statsd(&metrics.statsd_host, metrics.statsd_port, &metrics.prefix)?;
        shared::metrics_defs::describe_all(graph_batch::metrics_defs::ALL_METRICS);
    }

    match cli.command {
        CliCommand::Fetch { query, token } => {
            let token = match token {
                Some(token) => token,
                None => std::env::var(TOKEN_ENV).unwrap_or_default(),
            };
            let client = GraphClient::new(&config.graph)?;
            let profile = client
                .request_with(&StaticToken::new(token), &query.query)
                .await?;
            print_profile(&profile)?;
        }
        CliCommand::Reconcile { query, input } => {
            let catalog = config.graph.catalog();
            let template = catalog.lookup(&query.query)?;
            let raw = std::fs::read(&input)?;
            let profile = reconcile(template, &raw)?;
            print_profile(&profile)?;
        }
        CliCommand::AuthorizeUrl { state } => {
            let Some(oauth) = &config.graph.oauth else {
                return Err("no graph.oauth section in config".into());
            };
            println!("{}", oauth.authorize_url(&state));
        }
        CliCommand::Presets => {
            for key in config.graph.catalog().keys() {
                println!("{key}");
            }
        }
    }

    Ok(())
}

fn print_profile(profile: &Profile) -> Result<(), serde_json::Error> {
    let output = Output {
        profile,
        diagnostics: profile.diagnostics.iter().map(ToString::to_string).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
