//! Pokédex - look up pokémon and moves from PokéAPI with a local cache

use clap::{Parser, Subcommand};
use pokedex_cache::{Config, Pokedex, PokemonView, Result, Selection};
use std::path::PathBuf;

/// Pokédex command-line viewer backed by a persistent PokéAPI cache
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the cache files (overrides the config file)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// PokéAPI base URL (overrides the config file)
    #[arg(long)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one pokémon by pokédex number
    Show { id: u32 },
    /// Show the description of a move
    Move {
        name: String,
        /// Lookup URL (defaults to the move endpoint of the API)
        #[arg(long)]
        url: Option<String>,
    },
    /// List cached pokémon
    Cached,
    /// Remove all cached data
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize logging. Set RUST_LOG to control the level, e.g. RUST_LOG=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        log::error!("Application error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = dir.clone();
    }
    if let Some(url) = &args.api_base_url {
        config.api_base_url = url.clone();
    }
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let pokedex = Pokedex::open(&config);

    match args.command {
        Command::Show { id } => match pokedex.select(id).await? {
            Selection::Current(record) => println!("{}", PokemonView::from(&record)),
            Selection::Superseded { id } => log::warn!("Selection of {} was superseded", id),
        },
        Command::Move { name, url } => {
            let result = match url {
                Some(url) => pokedex.moves.get(&name, &url).await?,
                None => pokedex.describe_move(&name).await?,
            };
            match result {
                Some(desc) => println!("{}\n{}", desc.display_name, desc.description),
                None => println!("Another move lookup is in progress"),
            }
        }
        Command::Cached => {
            let records = pokedex.pokemon.cached_records().await;
            if records.is_empty() {
                println!("No cached pokémon");
            }
            for record in records {
                println!(
                    "#{} {}",
                    pokedex_cache::view::full_pokedex_number(record.id),
                    record.name
                );
            }
        }
        Command::Clear => {
            pokedex.clear().await?;
            println!("Cache cleared");
        }
    }

    Ok(())
}
