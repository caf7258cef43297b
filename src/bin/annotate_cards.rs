use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use combicards::content::card::RawCard;
use combicards::engine::annotate::annotate_document;
use combicards::logging;
use combicards::store::json_store::JsonStore;
use combicards::store::schema::{CARDS_FILE, CardsDocument};

#[derive(Parser)]
#[command(
    name = "annotate_cards",
    about = "Label raw cards with category, difficulty and tags"
)]
struct Args {
    /// JSON file with a card array (or an existing structured document).
    input: PathBuf,

    #[arg(short, long, default_value = ".", help = "Where cards.json is written")]
    output_dir: PathBuf,

    #[arg(short, long, help = "Deck title stored in the metadata")]
    title: Option<String>,
}

fn main() -> Result<()> {
    logging::init_stderr();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let raw: Vec<RawCard> = serde_json::from_str::<CardsDocument>(&text)
        .with_context(|| format!("parsing {}", args.input.display()))?
        .into_cards();

    let doc = annotate_document(&raw, args.title, Utc::now());
    log::info!(
        "annotated {} of {} cards",
        doc.metadata.total_cards,
        raw.len()
    );
    for (label, entry) in &doc.metadata.categories {
        log::info!("  {label}: {}", entry.count);
    }

    let store = JsonStore::with_base_dir(args.output_dir)?;
    store.save(CARDS_FILE, &doc)?;
    println!("wrote {}", store.file_path(CARDS_FILE).display());
    Ok(())
}
