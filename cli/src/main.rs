use anyhow::Result;
use clap::{Parser, Subcommand};
use recommend::{CatalogSource, JsonCatalog, Model};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "recommend-cli")]
#[command(about = "Build a TF-IDF similarity model from a catalog snapshot and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the most similar products for one catalog item
    Similar {
        /// Catalog path (.json/.jsonl file or directory)
        #[arg(long)]
        catalog: String,
        /// Catalog item id to query
        #[arg(long)]
        product: u32,
        /// Number of neighbors to return
        #[arg(long, default_value_t = recommend::engine::DEFAULT_TOP_N)]
        top: usize,
    },
    /// Print model statistics for a catalog snapshot
    Stats {
        /// Catalog path (.json/.jsonl file or directory)
        #[arg(long)]
        catalog: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Similar { catalog, product, top } => similar(&catalog, product, top),
        Commands::Stats { catalog } => stats(&catalog),
    }
}

fn build_model(catalog: &str) -> Result<Model> {
    let snapshot = JsonCatalog::new(catalog).load_snapshot()?;
    tracing::info!(items = snapshot.len(), "catalog snapshot loaded");
    Ok(Model::build(&snapshot))
}

fn similar(catalog: &str, product: u32, top: usize) -> Result<()> {
    let model = build_model(catalog)?;
    let neighbors = model.neighbors(product, top)?;
    if neighbors.is_empty() {
        println!("no similar products for {product}");
        return Ok(());
    }
    for (rank, n) in neighbors.iter().enumerate() {
        println!("{:>2}. product {:>6}  score {:.4}", rank + 1, n.id, n.score);
    }
    Ok(())
}

fn stats(catalog: &str) -> Result<()> {
    let model = build_model(catalog)?;
    println!("items:      {}", model.len());
    println!("vocabulary: {}", model.vocabulary().len());
    Ok(())
}
