use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use yatra::api::AppState;
use yatra::currency::parse_amount;
use yatra::{
    CatalogProvider, FjallTripStore, MemoryTripStore, SessionRegistry, StaticCatalog, TripRequest,
    TripStore, TripSummary, YatraConfig, YatraError, assess, logging, web,
};

#[derive(Debug, Parser)]
#[command(
    name = "yatra",
    version,
    about = "Trip planning wizard and budget estimator for domestic Indian travel"
)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,

        /// Keep saved trips in memory only
        #[arg(long)]
        ephemeral: bool,
    },
    /// Estimate the cost of a trip
    Estimate {
        /// Total budget in rupees, e.g. 10000 or "₹10,000"
        #[arg(long, allow_hyphen_values = true)]
        budget: String,

        /// Trip length, e.g. "3-4 days" or "1-2 weeks"
        #[arg(long)]
        duration: Option<String>,

        /// Travel style: economy, mid-range or premium
        #[arg(long)]
        style: Option<String>,

        #[arg(long, default_value = "Home")]
        from: String,

        #[arg(long, default_value = "Destination")]
        to: String,

        #[arg(long)]
        notes: Option<String>,

        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },
    /// List cities with travel guides
    Cities,
}

fn open_store(config: &YatraConfig, ephemeral: bool) -> Result<Arc<dyn TripStore>> {
    if ephemeral {
        info!("Using in-memory trip store");
        return Ok(Arc::new(MemoryTripStore::new()));
    }

    let path = config.store_path()?;
    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create trip store directory: {}", path.display()))?;
    Ok(Arc::new(FjallTripStore::open(&path)?))
}

async fn serve(mut config: YatraConfig, port: Option<u16>, ephemeral: bool) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let catalog: Arc<dyn CatalogProvider> =
        Arc::new(StaticCatalog::load(config.catalog.path.as_deref())?);
    let trips = open_store(&config, ephemeral)?;

    let sessions = SessionRegistry::with_ttl(config.session_ttl());

    web::run(&config, AppState::new(catalog, trips).with_sessions(sessions)).await
}

fn print_estimate(request: &TripRequest, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&assess(request)?)?);
    } else {
        print!("{}", TripSummary::from_request(request)?);
    }
    Ok(())
}

fn print_cities(config: &YatraConfig) -> Result<()> {
    let catalog = StaticCatalog::load(config.catalog.path.as_deref())?;
    for name in catalog.city_names() {
        if let Some(city) = catalog.city(name) {
            println!("{} ({})", city.name, city.state);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = YatraConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Command::Serve { port, ephemeral } => serve(config, port, ephemeral).await,
        Command::Estimate {
            budget,
            duration,
            style,
            from,
            to,
            notes,
            json,
        } => {
            let amount = parse_amount(&budget).ok_or_else(|| {
                YatraError::validation(format!("budget must be a number, got {budget:?}"))
            })?;

            let mut request = TripRequest::new(from, to, amount);
            request.duration = duration;
            request.travel_style = style;
            request.notes = notes;

            print_estimate(&request, json)
        }
        Command::Cities => print_cities(&config),
    }
}
