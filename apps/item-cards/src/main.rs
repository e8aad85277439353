mod config;
mod errors;
mod export;
mod layout;
mod models;
mod notion;
mod render;
mod routes;
mod state;
mod storage;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::{run_export, ItemSource};
use crate::layout::plan_pages;
use crate::notion::NotionClient;
use crate::render::{HtmlRenderer, Renderer};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "item-cards")]
#[command(about = "Export item cards from Notion and lay them out for printing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every item marked for printing into a dated card file
    Export {
        /// Directory for the card file (overrides OUTPUT_DIR)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the page plan for a card file as JSON
    Plan {
        /// Card file written by `export`
        file: PathBuf,
    },

    /// Render a card file into a printable HTML document next to it
    Render {
        /// Card file written by `export`
        file: PathBuf,

        /// Output path (defaults to the card file with an .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the HTTP API
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("item_cards={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Export { output_dir } => export(&config, output_dir).await,
        Commands::Plan { file } => plan(&file).await,
        Commands::Render { file, output } => render(&config, &file, output).await,
        Commands::Serve { port } => serve(config, port).await,
    }
}

async fn export(config: &Config, output_dir: Option<PathBuf>) -> Result<()> {
    let client = NotionClient::new(config.require_notion()?)?;
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

    let summary = run_export(&client, &output_dir, Utc::now().date_naive()).await?;
    println!(
        "{} item cards saved in {}",
        summary.count,
        summary.path.display()
    );
    Ok(())
}

async fn plan(file: &Path) -> Result<()> {
    let cards = storage::load_cards(file).await?;
    let plan = plan_pages(cards)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

async fn render(config: &Config, file: &Path, output: Option<PathBuf>) -> Result<()> {
    let renderer = HtmlRenderer::from_path(config.page_template.as_deref())?;
    let cards = storage::load_cards(file).await?;
    let plan = plan_pages(cards)?;
    let html = renderer.render(&plan.batches)?;

    let output = output.unwrap_or_else(|| storage::rendered_path(file));
    tokio::fs::write(&output, html)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "Rendered {} pages ({} cards) to {}",
        plan.summary.page_count,
        plan.summary.card_count,
        output.display()
    );
    Ok(())
}

async fn serve(config: Config, port: Option<u16>) -> Result<()> {
    info!("Starting item-cards API v{}", env!("CARGO_PKG_VERSION"));

    let source: Option<Arc<dyn ItemSource>> = match &config.notion {
        Some(notion) => {
            info!("Notion export enabled");
            Some(Arc::new(NotionClient::new(notion)?))
        }
        None => {
            info!("NOTION_TOKEN/DATABASE_ID not set, export endpoint disabled");
            None
        }
    };
    let renderer = Arc::new(HtmlRenderer::from_path(config.page_template.as_deref())?);

    let port = port.unwrap_or(config.port);
    let state = AppState {
        config,
        source,
        renderer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
