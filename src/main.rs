use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pogo_master::game_master::{ParserOptions, VariantMerge, read_game_master};
use pogo_master::output::{DirectorySink, write_pokedex};
use pogo_master::render::PokemonRenderer;
use pogo_master::translations::{TranslationCollection, Translations};

/// Turn a Pokemon GO game master export into a translated pokedex
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Translation files: JSON tables, or the game's text exports named after
    /// their language (e.g. `English.json`)
    #[clap(short, long)]
    translations: Vec<PathBuf>,

    /// Directory the pokedex is written to
    #[clap(short, long, default_value = "api")]
    output: PathBuf,

    /// Pretty-print the written JSON
    #[clap(long)]
    pretty: bool,

    /// Merge pokemon variants independently of record order
    #[clap(long)]
    deferred_variants: bool,

    /// Log debug output. `RUST_LOG` takes precedence when set.
    #[clap(short, long)]
    verbose: bool,

    /// GAME_MASTER.json
    input: PathBuf,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let variant_merge = if args.deferred_variants {
        VariantMerge::Deferred
    } else {
        VariantMerge::SourceOrder
    };
    let options = ParserOptions::builder().variant_merge(variant_merge).build();

    let game_master = read_game_master(&args.input, options)
        .with_context(|| format!("Failed to parse game master {}", args.input.display()))?;

    let translations = args
        .translations
        .iter()
        .map(|path| {
            TranslationCollection::read(path)
                .with_context(|| format!("Failed to load translations {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    for translation in &translations {
        info!("loaded {} translations", translation.language_name());
    }

    let translations: Vec<&dyn Translations> = translations
        .iter()
        .map(|translation| translation as &dyn Translations)
        .collect();
    let renderer = PokemonRenderer::new(&translations);
    let rendered = renderer.render_all(&game_master);

    let sink = DirectorySink::new(&args.output);
    write_pokedex(&sink, &rendered, args.pretty)
        .with_context(|| format!("Failed to write pokedex to {}", args.output.display()))?;

    Ok(())
}
