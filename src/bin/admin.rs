//! CLI administration tool for url-shortener.
//!
//! Manages short URLs and inspects codes directly against the database,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- create https://example.com/a
//!
//! # List all short URLs
//! cargo run --bin admin -- list
//!
//! # Look up a code
//! cargo run --bin admin -- resolve 1F
//!
//! # Delete a short URL
//! cargo run --bin admin -- delete 1F
//!
//! # Convert between ids and codes (no database needed)
//! cargo run --bin admin -- encode 125
//! cargo run --bin admin -- decode 21
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Database settings are read the same way as the server's (see
//! [`url_shortener::config`]). `encode` and `decode` need none.

use url_shortener::application::services::MappingService;
use url_shortener::config::{self, Config, mask_connection_string};
use url_shortener::infrastructure::persistence::PgMappingStore;
use url_shortener::server::connect_pool;
use url_shortener::utils::base62;
use url_shortener::utils::url_validation::validate_http_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List all short URLs
    List,

    /// Show the mapping behind a short code
    Resolve {
        /// Short code (e.g., "1F")
        code: String,
    },

    /// Shorten a URL
    Create {
        /// HTTP or HTTPS URL to shorten
        url: String,
    },

    /// Delete a short URL
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the short code for an id
    Encode {
        /// Non-negative id
        id: u64,
    },

    /// Print the id behind a short code
    Decode {
        /// Short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => return encode(id),
        Commands::Decode { code } => return decode(&code),
        _ => {}
    }

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::List => list_urls(service(&pool)).await?,
        Commands::Resolve { code } => resolve_code(service(&pool), &code).await?,
        Commands::Create { url } => create_url(service(&pool), &url).await?,
        Commands::Delete { code, yes } => delete_url(service(&pool), &code, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
        Commands::Encode { .. } | Commands::Decode { .. } => {}
    }

    Ok(())
}

fn service(pool: &PgPool) -> MappingService {
    MappingService::new(Arc::new(PgMappingStore::new(Arc::new(pool.clone()))))
}

/// Lists all short URLs ordered by id.
///
/// # Output Format
///
/// ```text
/// 📋 Short URLs
///
///   ID     Code         Created            URL
///   ─────────────────────────────────────────────────────────────────
///   1      1            2025-12-12 20:40   https://example.com/a
///   62     10           2025-12-13 09:15   https://example.com/b
/// ```
async fn list_urls(service: MappingService) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let mappings = service
        .list_mappings()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No short URLs found".yellow());
        println!();
        println!(
            "  Create one with: {} admin create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<6} {:<12} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<6} {:<12} {:<18} {}",
            mapping.id.to_string().bright_black(),
            mapping.code.cyan(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.original_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn resolve_code(service: MappingService, code: &str) -> Result<()> {
    let mapping = service
        .resolve_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:    {}", mapping.code.cyan());
    println!("  ID:      {}", mapping.id.to_string().bright_black());
    println!("  URL:     {}", mapping.original_url.bright_white());
    println!(
        "  Created: {}",
        mapping.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

async fn create_url(service: MappingService, url: &str) -> Result<()> {
    let url = validate_http_url(url).map_err(|e| anyhow::anyhow!("{}", e))?;

    let mapping = service
        .create_mapping(url.as_str())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created".green().bold());
    println!();
    println!("  Code: {}", mapping.code.bright_yellow().bold());
    println!("  ID:   {}", mapping.id.to_string().bright_black());
    println!();
    println!(
        "  Redirect: {}",
        format!("http://localhost:3000/u/{}", mapping.code).bright_cyan()
    );
    println!();

    Ok(())
}

/// Deletes a short URL after showing it and asking for confirmation.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Deleted codes are never reissued
async fn delete_url(service: MappingService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short URL".bright_blue().bold());
    println!();

    let mapping = service
        .resolve_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code: {}", mapping.code.cyan());
    println!("  URL:  {}", mapping.original_url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_mapping(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short URL: {}", e))?;

    println!();
    println!("{}", "✅ Short URL deleted".green().bold());
    println!();

    Ok(())
}

fn encode(id: u64) -> Result<()> {
    println!("{}", base62::encode(id));
    Ok(())
}

fn decode(code: &str) -> Result<()> {
    let id = base62::decode(code).with_context(|| format!("'{code}' is not a valid short code"))?;
    println!("{id}");
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;

            if let Some(ref url) = config.database_url {
                println!("  Connection: {}", mask_connection_string(url).bright_black());
            }
            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Short URLs: {}",
                urls_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
