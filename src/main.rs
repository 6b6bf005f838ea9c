//! Command-line access to the client repository.
//!
//! ```text
//! pushkind-repository list --hub 1 [--page 2] [--per-page 20] [--search bob] [--desc]
//! pushkind-repository add --hub 1 --name Bob --email bob@example.com [--phone 123]
//! pushkind-repository count --hub 1 [--search bob]
//! ```

use std::env;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use config::Config;
use dotenvy::dotenv;

use pushkind_repository::db::{establish_connection_pool, run_migrations};
use pushkind_repository::models::client::{Client, NewClient};
use pushkind_repository::models::config::AppConfig;
use pushkind_repository::repository::{EntityReader, Repository, SortDirection};
use pushkind_repository::services::clients::{
    ClientsQuery, add_client, hub_filter, list_clients,
};

#[derive(Debug, Parser)]
#[command(version, about = "Client repository tool", long_about = None)]
#[command(name = "pushkind-repository")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Print one page of clients as JSON.
    List(ClientsArgs),
    /// Print the number of matching clients.
    Count(ClientsArgs),
    /// Create a client and print it as JSON.
    Add(NewClientArgs),
}

#[derive(Debug, PartialEq, Args)]
struct ClientsArgs {
    #[arg(long = "hub")]
    hub_id: i32,
    #[arg(long)]
    page: Option<usize>,
    #[arg(long)]
    per_page: Option<usize>,
    /// Substring matched against name and email.
    #[arg(long)]
    search: Option<String>,
    /// Sort names in descending order.
    #[arg(long)]
    desc: bool,
}

impl ClientsArgs {
    fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Debug, PartialEq, Args)]
struct NewClientArgs {
    #[arg(long = "hub")]
    hub_id: i32,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
}

fn load_config() -> Result<AppConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn run(command: Command, config: &AppConfig) -> Result<(), String> {
    let pool = establish_connection_pool(&config.database_url)
        .map_err(|e| format!("Failed to establish database connection: {e}"))?;

    let applied = run_migrations(&pool).map_err(|e| e.to_string())?;
    if applied > 0 {
        log::info!("Applied {applied} pending migrations");
    }

    let repo: Repository<Client> = Repository::new(pool);

    match command {
        Command::List(args) => {
            let direction = args.direction();
            let page = list_clients(
                &repo,
                ClientsQuery {
                    hub_id: args.hub_id,
                    search: args.search,
                    page: args.page,
                    per_page: args.per_page.unwrap_or(config.per_page),
                    direction: Some(direction),
                },
            )
            .map_err(|e| e.to_string())?;
            let json = serde_json::to_string_pretty(&page).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        Command::Count(args) => {
            let total = repo
                .count(Some(hub_filter(args.hub_id, args.search.as_deref())))
                .map_err(|e| e.to_string())?;
            println!("{total}");
        }
        Command::Add(args) => {
            let new_client = NewClient::new(
                args.hub_id,
                &args.name,
                &args.email,
                args.phone.as_deref(),
            );
            let client = add_client(&repo, new_client).map_err(|e| e.to_string())?;
            log::info!("Created client {} in hub {}", client.id, client.hub_id);
            let json = serde_json::to_string_pretty(&client).map_err(|e| e.to_string())?;
            println!("{json}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
