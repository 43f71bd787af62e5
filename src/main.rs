//! Menu Tally CLI
//!
//! Browse a restaurant menu, build up an order, and print the priced summary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use menu_tally::{Catalog, db, order, sample_menu};

#[derive(Parser)]
#[command(name = "menu-tally")]
#[command(about = "Restaurant menu and order summary calculator")]
struct Cli {
    /// Path to the SQLite database
    #[arg(short, long, env = "MENU_TALLY_DB", default_value = "menu_tally.db")]
    database: PathBuf,

    /// Currency symbol used when printing prices
    #[arg(short, long, env = "MENU_TALLY_CURRENCY", default_value = "£")]
    currency: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize empty database with schema
    Init,

    /// Replace the menu with the built-in sample menu
    LoadSample,

    /// Import menu items from a JSON file or a directory of JSON files
    Import {
        /// Path to a .json file or directory
        path: PathBuf,

        /// Clear the existing menu before importing
        #[arg(long)]
        clear: bool,
    },

    /// List the menu
    Menu,

    /// Show details for a specific menu item
    Item {
        /// Menu item ID
        id: i64,
    },

    /// Add one unit of each given item to the order
    Add {
        /// Menu item IDs (repeat an ID to order several)
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Remove one unit of an item from the order
    Remove {
        /// Menu item ID
        id: i64,
    },

    /// Empty the current order
    ClearOrder,

    /// Print the priced order summary
    Summary {
        /// Also show the raw order log and unpriced entries
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let conn = Connection::open(&cli.database)?;
    db::init_schema(&conn)?;
    tracing::debug!(database = %cli.database.display(), "opened database");

    match cli.command {
        Commands::Init => {
            println!("Database initialized at: {}", cli.database.display());
        }

        Commands::LoadSample => {
            let catalog = Catalog::new(sample_menu())?;
            let count = db::save_catalog(&conn, &catalog, true)?;
            println!("Loaded {} sample menu items", count);
        }

        Commands::Import { path, clear } => {
            let catalog = Catalog::load(&path)?;
            if clear {
                println!("Clearing existing menu...");
            }
            let count = db::save_catalog(&conn, &catalog, clear)?;
            tracing::info!(count, path = %path.display(), "imported menu");
            println!("Imported {} menu items", count);
        }

        Commands::Menu => {
            let items = db::list_menu_items(&conn)?;
            if items.is_empty() {
                println!("No menu items in database. Run 'import' or 'load-sample' first.");
            } else {
                for item in &items {
                    println!("{}", order::format_menu_item(item, &cli.currency));
                }
            }
        }

        Commands::Item { id } => match db::get_menu_item(&conn, id)? {
            Some(item) => {
                println!("Menu item: {} {}", item.emoji, item.name);
                println!("  ID: {}", item.id);
                println!("  Price: {}{}", cli.currency, item.price);
                if !item.ingredients.is_empty() {
                    println!("  Ingredients:");
                    for ingredient in &item.ingredients {
                        println!("    {}", ingredient);
                    }
                }
                let ordered = db::order_entries(&conn)?.iter().filter(|&&e| e == id).count();
                if ordered > 0 {
                    println!("  In order: {}", ordered);
                }
            }
            None => println!("Menu item '{}' not found", id),
        },

        Commands::Add { ids } => {
            let count = db::add_to_order(&conn, &ids)?;
            println!("Added {} item(s) to the order", count);
        }

        Commands::Remove { id } => {
            if db::remove_order_entry(&conn, id)? {
                println!("Removed one of item {} from the order", id);
            } else {
                println!("Item {} is not in the order", id);
            }
        }

        Commands::ClearOrder => {
            db::clear_order(&conn)?;
            println!("Order cleared");
        }

        Commands::Summary { verbose } => {
            let entries = db::order_entries(&conn)?;
            let menu = db::list_menu_items(&conn)?;
            let summary = order::summarize_order(&entries, &menu);

            if verbose {
                println!("Order log ({} entries): {:?}\n", entries.len(), entries);
            }

            println!("{}", order::format_receipt(&summary, &cli.currency));

            if verbose && !summary.skipped.is_empty() {
                println!("Not on the menu (skipped): {:?}", summary.skipped);
            }
        }
    }

    Ok(())
}
