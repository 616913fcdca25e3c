//! Command line front end for the nimbusec API.

mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use nimbusec::{Agent, Config, Filter, NimbusecClient};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::output::{print_json, write_bytes};

#[derive(Parser)]
#[command(name = "nimbusec", version)]
#[command(about = "Query and manage a nimbusec security monitoring account", long_about = None)]
struct Cli {
    /// API endpoint
    #[arg(long, env = "NIMBUSEC_URL", default_value = nimbusec::DEFAULT_API, global = true)]
    url: String,

    /// API key
    #[arg(long, env = "NIMBUSEC_KEY", hide_env_values = true, global = true)]
    key: Option<String>,

    /// API secret
    #[arg(long, env = "NIMBUSEC_SECRET", hide_env_values = true, global = true)]
    secret: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// A server-side filter expression such as `name eq "example.com"`.
#[derive(Args)]
struct FilterArg {
    /// Filter expression; omit to list everything
    #[arg(short, long, value_name = "EXPR")]
    filter: Option<String>,
}

impl FilterArg {
    fn filter(&self) -> Filter {
        self.filter.as_deref().map(Filter::from).unwrap_or_default()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Monitored domains
    #[command(subcommand)]
    Domains(DomainCommand),

    /// List domains with open findings
    Infected(FilterArg),

    /// Account users
    #[command(subcommand)]
    Users(UserCommand),

    /// Scan bundles
    #[command(subcommand)]
    Bundles(ListCommand),

    /// Agent tokens
    #[command(subcommand)]
    Tokens(ListCommand),

    /// Server agent builds
    #[command(subcommand)]
    Agents(AgentCommand),
}

#[derive(Subcommand)]
enum DomainCommand {
    /// List domains
    List(FilterArg),
    /// Show one domain
    Get {
        /// Domain id
        id: i64,
    },
    /// Delete a domain
    Delete {
        /// Domain id
        id: i64,
        /// Also remove all stored scan data
        #[arg(long)]
        purge: bool,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// List users
    List(FilterArg),
    /// Show the user with this login
    Get {
        /// Login name
        login: String,
    },
}

#[derive(Subcommand)]
enum ListCommand {
    /// List records
    List(FilterArg),
}

#[derive(Subcommand)]
enum AgentCommand {
    /// List agent builds
    List(FilterArg),
    /// Download an agent build
    Download {
        /// Operating system, e.g. linux
        os: String,
        /// Architecture, e.g. 64bit
        arch: String,
        /// Agent version
        version: i64,
        /// Archive format, e.g. zip
        format: String,
        /// Output file; defaults to stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Initialize tracing subscriber based on verbosity and output format
fn init_tracing(verbose: u8, json: bool) {
    // RUST_LOG wins over -v flags
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,nimbusec=info".to_string(),
            2 => "info,nimbusec=debug".to_string(),
            _ => "debug,nimbusec=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_file(verbose >= 3)
                    .with_line_number(verbose >= 3)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    }
}

/// Builds the client from flags, falling back to the environment.
fn connect(cli: &Cli) -> Result<NimbusecClient> {
    let lookup = |var: &str| match var {
        nimbusec::config::ENV_URL => Some(cli.url.clone()),
        nimbusec::config::ENV_KEY => cli.key.clone(),
        nimbusec::config::ENV_SECRET => cli.secret.clone(),
        _ => None,
    };

    let config = Config::from_lookup(lookup)?;
    tracing::debug!(url = %config.url, key = %config.key, "connecting");

    config
        .client()
        .wrap_err_with(|| format!("Failed to create client for {}", config.url))
}

async fn run(cli: Cli) -> Result<()> {
    let client = connect(&cli)?;

    match cli.command {
        Commands::Domains(DomainCommand::List(args)) => {
            print_json(&client.domains().find(args.filter()).await?)
        }
        Commands::Domains(DomainCommand::Get { id }) => {
            print_json(&client.domains().get(id).await?)
        }
        Commands::Domains(DomainCommand::Delete { id, purge }) => {
            client.domains().delete(id, purge).await?;
            tracing::info!(id, purge, "domain deleted");
            Ok(())
        }
        Commands::Infected(args) => {
            print_json(&client.domains().find_infected(args.filter()).await?)
        }
        Commands::Users(UserCommand::List(args)) => {
            print_json(&client.users().find(args.filter()).await?)
        }
        Commands::Users(UserCommand::Get { login }) => {
            print_json(&client.users().get_by_login(&login).await?)
        }
        Commands::Bundles(ListCommand::List(args)) => {
            print_json(&client.bundles().find(args.filter()).await?)
        }
        Commands::Tokens(ListCommand::List(args)) => {
            print_json(&client.tokens().find(args.filter()).await?)
        }
        Commands::Agents(AgentCommand::List(args)) => {
            print_json(&client.agents().find(args.filter()).await?)
        }
        Commands::Agents(AgentCommand::Download {
            os,
            arch,
            version,
            format,
            output,
        }) => {
            let agent = Agent {
                os,
                arch,
                version,
                format,
                ..Default::default()
            };
            let archive = client
                .agents()
                .download(&agent)
                .await
                .wrap_err_with(|| format!("Failed to download {}", agent.file_name()))?;
            write_bytes(&archive, output.as_deref())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_verbosity, cli.json_logs);

    run(cli).await
}
