//! printful
//!
//! Command line access to the Printful API: browse the catalog, place
//! orders and quote tax and shipping from JSON payload files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use printful_client::config::publish_template;
use printful_client::{PrintfulClient, PrintfulError, Settings};

#[derive(Debug, Parser)]
#[command(name = "printful", version, about = "Printful API client")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog products
    Products,
    /// Show a product and its variants
    Variants { product_id: i64 },
    /// Place an order from a JSON file
    CreateOrder { file: PathBuf },
    /// Look up the tax rate for the recipient in a JSON file
    TaxRate { file: PathBuf },
    /// Quote shipping rates for the request in a JSON file
    ShippingRates { file: PathBuf },
    /// Write the config template into a directory
    PublishConfig {
        dir: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs)?;

    if let Command::PublishConfig { dir, force } = &cli.command {
        let path = publish_template(dir, *force)
            .with_context(|| format!("Failed to publish config into {}", dir.display()))?;
        println!("{}", path.display());
        return Ok(());
    }

    let settings = Settings::load().context("Failed to load configuration")?;
    let client = PrintfulClient::from_settings(&settings)?;

    info!("printful v{} using {}", env!("CARGO_PKG_VERSION"), client.base_url());

    match cli.command {
        Command::Products => print(&client.get_products().await),
        Command::Variants { product_id } => print(&client.get_variants(product_id).await),
        Command::CreateOrder { file } => print(&client.create_order(&read_json(&file)?).await),
        Command::TaxRate { file } => print(&client.calculate_tax_rate(&read_json(&file)?).await),
        Command::ShippingRates { file } => {
            print(&client.calculate_shipping_rates(&read_json(&file)?).await)
        }
        Command::PublishConfig { .. } => Ok(()),
    }
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("printful_client=info".parse()?)
        .add_directive("printful=info".parse()?);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Pretty-print a result, expanding validation failures field by field
fn print<T: Serialize>(result: &Result<T, PrintfulError>) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
        Err(PrintfulError::Validation { message, errors }) => {
            eprintln!("{}", serde_json::to_string_pretty(errors)?);
            anyhow::bail!("{}", message)
        }
        Err(e) => anyhow::bail!("{}", e),
    }
}
