use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use movie_store::{
    FileKeyValueStore, Movie, MovieId, MovieStore, NewMovie, StoreConfig, DEFAULT_STORAGE_KEY,
};

/// Manage a local movie catalog.
#[derive(Debug, Parser)]
#[command(name = "movies", version)]
struct Cli {
    /// Directory the catalog is stored in.
    #[arg(long, env = "MOVIE_STORE_DIR", default_value = ".movies", global = true)]
    data_dir: PathBuf,

    /// Storage key of the catalog.
    #[arg(long, env = "MOVIE_STORE_KEY", default_value = DEFAULT_STORAGE_KEY, global = true)]
    key: String,

    /// Print movies as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List all movies.
    List,
    /// List favorite movies.
    Favorites,
    /// Show one movie.
    Show { id: MovieId },
    /// Add a movie.
    Add(AddArgs),
    /// Delete a movie.
    Delete { id: MovieId },
    /// Rate a movie from 0 to 10.
    Rate {
        id: MovieId,
        #[arg(value_parser = parse_rating)]
        rating: f64,
    },
    /// Change title and description of a movie.
    Update {
        id: MovieId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    /// Flip the favorite flag of a movie.
    ToggleFavorite { id: MovieId },
}

#[derive(Debug, Args)]
struct AddArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value_t = 0.0, value_parser = parse_rating)]
    rating: f64,
    #[arg(long)]
    favorite: bool,
    /// Use this id instead of the next free one.
    #[arg(long)]
    id: Option<MovieId>,
}

fn parse_rating(value: &str) -> Result<f64, String> {
    let rating: f64 = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if (0.0..=10.0).contains(&rating) {
        Ok(rating)
    } else {
        Err(format!("rating must be between 0 and 10, got {}", rating))
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let storage = FileKeyValueStore::open(&cli.data_dir)
        .with_context(|| format!("opening data directory {}", cli.data_dir.display()))?;
    let config = StoreConfig::new().with_key(cli.key.clone());
    let mut store = MovieStore::open_with(storage, config).context("loading movies")?;

    run(&mut store, cli.command, cli.json)
}

fn run(store: &mut MovieStore<FileKeyValueStore>, command: Command, json: bool) -> Result<()> {
    match command {
        Command::List => print_movies(store.list(), json)?,
        Command::Favorites => print_movies(&store.favorites(), json)?,
        Command::Show { id } => match store.get(id) {
            Some(movie) => print_movies(std::slice::from_ref(movie), json)?,
            None => bail!("no movie with id {}", id),
        },
        Command::Add(args) => {
            let mut movie = NewMovie::new(args.title, args.description)
                .with_rating(args.rating)
                .favorite(args.favorite);
            movie.id = args.id;

            let added = store.add(movie)?;
            info!(id = added.id, "added movie");
            print_movies(std::slice::from_ref(&added), json)?;
        }
        Command::Delete { id } => report(store.delete_by_id(id)?, id),
        Command::Rate { id, rating } => report(store.rate(id, rating)?, id),
        Command::Update {
            id,
            title,
            description,
        } => {
            let Some(existing) = store.get(id) else {
                bail!("no movie with id {}", id);
            };
            let movie = Movie {
                title,
                description,
                ..existing.clone()
            };
            store.update(&movie)?;
        }
        Command::ToggleFavorite { id } => report(store.toggle_favorite(id)?, id),
    }

    Ok(())
}

fn report(changed: bool, id: MovieId) {
    if !changed {
        warn!(id, "no movie changed");
    }
}

fn print_movies(movies: &[Movie], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(movies)?);
        return Ok(());
    }

    for movie in movies {
        println!(
            "{:>4}  {}{}  ({:.1}/10)",
            movie.id,
            if movie.is_favorite { "* " } else { "" },
            movie.title,
            movie.rating
        );
        if !movie.description.is_empty() {
            println!("      {}", movie.description);
        }
    }
    Ok(())
}
