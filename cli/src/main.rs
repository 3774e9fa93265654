//! Cambio CLI
//!
//! Stand-in for the widget surface: feeds input events into a session
//! and prints the display strings that come back.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cambio_common::{Currency, JsonFileStore, MemoryStore, Storage};
use cambio_engine::{History, InputEvent, Session, SessionConfig, WidgetView};
use cambio_rates::{HttpRateProvider, RateServiceConfig, RateSource, RateStore};

/// Cambio currency converter CLI
#[derive(Parser, Debug)]
#[command(name = "cambio")]
#[command(about = "Currency conversion with cached rates and history")]
struct Args {
    /// Directory for cached rates and conversion history
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep all state in memory only
    #[arg(long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an amount and record it in the history
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    /// Show the rates grid for a base currency
    Rates { base: String },
    /// Show the conversion history
    History,
    /// Clear the conversion history
    ClearHistory,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let storage = open_storage(&args)?;
    let rate_config = RateServiceConfig::from_env();
    rate_config.validate().map_err(anyhow::Error::msg)?;
    tracing::debug!(url = %rate_config.base_url, "Using rate service");

    let session_config = SessionConfig::default();
    let store = Arc::new(RateStore::new(
        Arc::new(HttpRateProvider::new(&rate_config)),
        storage.clone(),
        &rate_config,
    ));
    let history = Arc::new(History::load(storage, session_config.history_capacity));
    let (mut session, _updates) = Session::new(store, history, session_config);

    match args.command {
        Command::Convert { amount, from, to } => {
            session
                .handle(InputEvent::FromCurrencyChanged(Currency::new(from)))
                .await?;
            session
                .handle(InputEvent::ToCurrencyChanged(Currency::new(to)))
                .await?;
            session.handle(InputEvent::AmountChanged(amount)).await?;

            let view = session
                .handle(InputEvent::ConvertRequested)
                .await?
                .context("conversion produced no view")?;

            println!("{}", view.result_text);
            println!("{}", view.rate_text);
            print_source_note(&view);
        }
        Command::Rates { base } => {
            let view = session
                .handle(InputEvent::FromCurrencyChanged(Currency::new(base)))
                .await?
                .context("rate load produced no view")?;

            if let Some(last_update) = &view.last_update {
                println!("{last_update}");
            }
            for row in &view.rates_grid {
                println!("{row}");
            }
            print_source_note(&view);
        }
        Command::History => {
            for line in &session.view().history_lines {
                println!("{line}");
            }
        }
        Command::ClearHistory => {
            session
                .handle(InputEvent::ClearHistoryRequested)
                .await?
                .context("clear produced no view")?;
            println!("Conversion history cleared");
        }
    }

    Ok(())
}

fn open_storage(args: &Args) -> anyhow::Result<Arc<dyn Storage>> {
    if args.memory {
        return Ok(Arc::new(MemoryStore::new()));
    }

    let dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .context("no platform data directory; pass --data-dir or --memory")?
            .join("cambio"),
    };

    Ok(Arc::new(JsonFileStore::open(dir)?))
}

fn print_source_note(view: &WidgetView) {
    if view.rate_source == Some(RateSource::Fallback) {
        println!("(approximate built-in rates; rate service unavailable)");
    }
}
