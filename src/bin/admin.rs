//! CLI administration tool for link-shortener.
//!
//! Manages links and the database directly, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links with click counts
//! cargo run --bin admin -- link list
//!
//! # Create a link (random code, or a custom one)
//! cargo run --bin admin -- link create https://example.com --code promo24
//!
//! # Show one link
//! cargo run --bin admin -- link show promo24
//!
//! # Delete a link
//! cargo run --bin admin -- link delete promo24
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_HOST`/`DB_USER`/...): PostgreSQL connection
//! - `DB_MAX_CONNECTIONS`, `DB_CONNECT_TIMEOUT`, ...: same pool settings as the server

use link_shortener::application::services::LinkService;
use link_shortener::config;
use link_shortener::domain::entities::Link;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::server::{connect_pool, run_migrations};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Create a new short link
    Create {
        /// Target URL
        url: String,

        /// Custom code (6-8 letters and digits); generated if omitted
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a single link without recording a click
    Show { code: String },

    /// Delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_pool(&config).await?;

    let result = match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let service = link_service(pool);

    match action {
        LinkAction::List => {
            let links = service.list_links().await?;
            print_link_table(&links);
        }
        LinkAction::Create { url, code } => {
            let link = service.create_link(url, code).await?;

            println!("{}", "✅ Link created".green().bold());
            print_link_details(&link);
        }
        LinkAction::Show { code } => {
            let link = service.get_link(&code).await?;
            print_link_details(&link);
        }
        LinkAction::Delete { code, yes } => {
            let link = service.get_link(&code).await?;
            print_link_details(&link);

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Delete this link?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "Cancelled".red());
                    return Ok(());
                }
            }

            service.delete_link(&code).await?;
            println!("{}", "✅ Link deleted".green().bold());
        }
    }

    Ok(())
}

fn link_service(pool: &PgPool) -> LinkService<PgLinkRepository> {
    LinkService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))))
}

/// Prints links as a table.
///
/// ```text
///   Code      Clicks  Last click         URL
///   ─────────────────────────────────────────────────────────────
///   Ab3dE9    12      2026-03-02 10:30   https://example.com
/// ```
fn print_link_table(links: &[Link]) {
    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return;
    }

    println!(
        "  {:<9} {:<7} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last click".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in links {
        let clicks = link.total_clicks.to_string();
        let clicks = if link.was_clicked() {
            clicks.bright_green()
        } else {
            clicks.bright_black()
        };

        println!(
            "  {:<9} {:<7} {:<18} {}",
            link.code.cyan(),
            clicks,
            format_last_click(link).bright_black(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
}

fn print_link_details(link: &Link) {
    println!("  Code:       {}", link.code.cyan().bold());
    println!("  URL:        {}", link.url);
    println!(
        "  Clicks:     {}",
        link.total_clicks.to_string().bright_green()
    );
    println!("  Last click: {}", format_last_click(link));
    println!(
        "  Created:    {}",
        link.created_at.format("%Y-%m-%d %H:%M")
    );
}

fn format_last_click(link: &Link) -> String {
    link.last_clicked_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            link_service(pool).check_store().await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            run_migrations(pool).await?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
