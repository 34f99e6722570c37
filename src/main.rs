use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use menubank::{
    BlobStore, FsBlobStore, FsPointerStore, HttpBlobStore, HttpPointerStore, InMemoryBlobStore,
    InMemoryPointerStore, MenuDocument, MenuRepository, PointerStore, SimilaritySearchEngine,
};

#[derive(Parser)]
#[command(name = "menubank")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Root directory for the filesystem-backed stores
    #[arg(short, long, global = true, default_value = "~/.menubank")]
    data_dir: String,

    /// Keep everything in memory; nothing survives the process
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Use the HTTP store adapters (MENUBANK_BLOB_BASE_URL and
    /// MENUBANK_POINTER_BASE_URL must be set)
    #[arg(long, global = true)]
    remote: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a menu document from a JSON file
    Save {
        file: String,

        /// Menu id; generated when omitted
        #[arg(short, long)]
        id: Option<String>,
    },

    /// Fetch a menu by id and print it
    Get { id: String },

    /// List saved menus, most recent first
    History,

    /// Find menus similar to a query around a target duration
    Search {
        query: String,

        /// Target duration in minutes
        #[arg(short = 't', long, default_value = "30")]
        duration: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (blob_store, pointer_store): (Arc<dyn BlobStore>, Arc<dyn PointerStore>) =
        if cli.memory_storage {
            info!("Using in-memory stores");
            (
                Arc::new(InMemoryBlobStore::new()),
                Arc::new(InMemoryPointerStore::new()),
            )
        } else if cli.remote {
            info!("Using HTTP stores");
            (
                Arc::new(HttpBlobStore::from_env()?),
                Arc::new(HttpPointerStore::from_env()?),
            )
        } else {
            let data_dir = expand_tilde(&cli.data_dir);
            std::fs::create_dir_all(&data_dir)?;
            info!("Using filesystem stores under {}", data_dir);
            (
                Arc::new(FsBlobStore::new(&data_dir)),
                Arc::new(FsPointerStore::new(&data_dir)),
            )
        };

    let repository = MenuRepository::new(blob_store.clone(), pointer_store.clone());

    match cli.command {
        Commands::Save { file, id } => {
            let body = std::fs::read_to_string(&file)?;
            let document: MenuDocument = serde_json::from_str(&body)?;
            let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());

            let url = repository.save(&id, &document).await?;
            println!("Saved menu {} at {}", id, url);
        }

        Commands::Get { id } => match repository.get_by_id(&id).await {
            Some(document) => println!("{}", serde_json::to_string_pretty(&document)?),
            None => println!("No menu found for id {}", id),
        },

        Commands::History => {
            let records = repository.list_history().await;

            if records.is_empty() {
                println!("No menus saved.");
            } else {
                println!("Saved menus:\n");
                for record in records {
                    println!("  {} ({})", record.title, record.id);
                    let levels: Vec<&str> =
                        record.load_levels.iter().map(|l| l.as_str()).collect();
                    println!(
                        "    {} min, levels [{}], created {}",
                        record.duration,
                        levels.join(","),
                        record.created_at.to_rfc3339()
                    );
                    if !record.target_skills.is_empty() {
                        println!("    Skills: {}", record.target_skills.join(", "));
                    }
                    println!();
                }
            }
        }

        Commands::Search { query, duration } => {
            let engine = SimilaritySearchEngine::new(blob_store.clone(), pointer_store.clone());
            let results = engine.search(&query, duration).await;

            if results.is_empty() {
                println!("No results found.");
            } else {
                println!("Found {} results:\n", results.len());

                for (i, hit) in results.iter().enumerate() {
                    println!("{}. {}", i + 1, hit.display_line());
                    for section in &hit.document().sections {
                        println!(
                            "   | {} ({} min, {} items)",
                            section.name,
                            section.total_time,
                            section.items.len()
                        );
                    }
                    println!();
                }
            }
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn search_duration_defaults_to_thirty() {
        let cli = Cli::try_parse_from(["menubank", "search", "A kick"]).unwrap();
        match cli.command {
            Commands::Search { duration, .. } => assert_eq!(duration, 30.0),
            _ => panic!("expected the search subcommand"),
        }
    }

    #[test]
    fn memory_and_remote_flags_parse() {
        assert!(Cli::try_parse_from(["menubank", "--memory-storage", "history"]).is_ok());
        assert!(Cli::try_parse_from(["menubank", "--remote", "history"]).is_ok());
    }
}
