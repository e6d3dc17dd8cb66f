mod script;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use blockweave_config::Config;
use blockweave_engine::blocks::parse_document;
use blockweave_engine::{
    CharRange, Document, MirrorObserver, NativeGrammar, Node, ReparseSettings,
};
use clap::Parser;

use script::Script;

#[derive(Parser)]
#[command(name = "blockweave", version, about = "Replay an edit script against a document")]
struct Cli {
    /// TOML edit script (`text` plus `[[edits]]`)
    script: PathBuf,

    /// Config file to use instead of ~/.config/blockweave/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compare the final blocks against a full reparse
    #[arg(long)]
    full: bool,
}

fn load_settings(cli: &Cli) -> Result<ReparseSettings> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} does not exist", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    log::info!("Using settings {config:?}");
    Ok(ReparseSettings {
        full_reparse_threshold: config.full_reparse_threshold,
        check_invariants: config.check_invariants,
    })
}

fn print_blocks(doc: &Document) -> Result<()> {
    for (index, block) in doc.blocks().iter().enumerate() {
        println!(
            "  {index:>3} {:<15} {} {:?}",
            block.kind().to_string(),
            block.enclosing_range(),
            doc.slice(block.content_range())?
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    let script = Script::load(&cli.script)?;

    let mut doc = Document::with_settings(&script.text, settings);
    let mut mirror = MirrorObserver::new(doc.blocks().to_vec());

    for (i, edit) in script.edits.iter().enumerate() {
        let range = CharRange::new(edit.start, edit.length);
        println!("edit {} {range} -> {:?}", i + 1, edit.replacement);
        mirror.clear_transcript();
        let patch = doc
            .edit(range, &edit.replacement, &mut mirror)
            .with_context(|| format!("Edit {} failed", i + 1))?;
        for line in &mirror.transcript {
            println!("  {line}");
        }
        println!(
            "  reparsed {} (replaced {}), blocks {:?}",
            patch.invalidation.reparse, patch.invalidation.replaced, patch.block_range
        );
    }

    if !mirror.errors.is_empty() {
        bail!("Observer could not apply {} notifications", mirror.errors.len());
    }

    println!("text: {:?}", doc.text());
    println!("blocks:");
    print_blocks(&doc)?;
    println!("presentation: {:?}", doc.presentation()?);

    if cli.full {
        let full = parse_document(&NativeGrammar, doc.buffer());
        if full.as_slice() != doc.blocks() || mirror.blocks != full {
            bail!("Incremental blocks differ from a full reparse");
        }
        println!("full reparse: matches");
    }

    Ok(())
}
