use std::collections::HashSet;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use marquee::db::models::InteractionKind;

mod config;

/// Marquee: hybrid movie recommendations with explainable match scores.
///
/// Combines content similarity, collaborative signals, and a per-user genre
/// profile into one ranked list, with a human-readable reason per result.
#[derive(Parser)]
#[command(name = "marquee", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database and seed the demo catalog
    Init,

    /// Recommend movies for a user (hybrid ranking)
    Recommend {
        /// The user to recommend for
        user_id: i64,

        /// How many results to return (default from MARQUEE_TOP_N, else 10)
        #[arg(long)]
        top_n: Option<usize>,

        /// Emit the ranked list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Find movies similar to one or more seed movies (content signal only)
    Similar {
        /// Seed movie ids
        #[arg(required = true)]
        movie_ids: Vec<i64>,

        /// How many results to return
        #[arg(long, default_value = "5")]
        top_n: usize,
    },

    /// What users with overlapping history watched that this user hasn't
    AlsoWatched {
        user_id: i64,

        /// How many results to return
        #[arg(long, default_value = "5")]
        top_n: usize,
    },

    /// Show a user's genre profile and top interests
    Profile { user_id: i64 },

    /// Record a watch event
    Watch {
        user_id: i64,
        movie_id: i64,

        /// Seconds watched
        #[arg(long, default_value = "0")]
        seconds: u32,
    },

    /// Record a like
    Like { user_id: i64, movie_id: i64 },

    /// Record a dislike
    Dislike { user_id: i64, movie_id: i64 },

    /// Record a search query (searches feed the genre profile)
    Search { user_id: i64, query: String },

    /// Show a user's interaction history, newest first
    History { user_id: i64 },

    /// Movies with the most interactions across all users
    Trending,

    /// Browse the catalog by rating, optionally filtered by genre
    Movies {
        /// Genre substring to filter by (e.g. "Sci-Fi")
        #[arg(long)]
        genre: Option<String>,
    },

    /// Show system status (catalog size, activity totals, recent events)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marquee=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Marquee database...");
            let db = marquee::db::initialize(&config.db_path)?;
            let table_count = db.table_count().await?;
            let movies = db.list_movies().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("Catalog seeded: {} movies", movies.len());
            println!("\nMarquee is ready. Try: cargo run -- recommend 1");
        }

        Commands::Recommend {
            user_id,
            top_n,
            json,
        } => {
            let db = marquee::db::open(&config.db_path)?;
            let top_n = top_n.unwrap_or(config.default_top_n);

            // One snapshot per cycle — the engine only ever sees plain data
            let movies = db.list_movies().await?;
            let interactions = db.list_interactions().await?;
            let searches = db.list_searches().await?;

            let results = marquee::engine::hybrid::recommend(
                &movies,
                &interactions,
                &searches,
                user_id,
                top_n,
                &marquee::engine::hybrid::RankerConfig::default(),
                &marquee::engine::profile::ProfileWeights::default(),
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                marquee::output::terminal::display_recommendations(&results);
            }
        }

        Commands::Similar { movie_ids, top_n } => {
            let db = marquee::db::open(&config.db_path)?;
            let movies = db.list_movies().await?;

            let model = marquee::catalog::similarity::SimilarityModel::build(&movies);
            let seeds: HashSet<i64> = movie_ids.iter().copied().collect();

            let any_known = movie_ids.iter().any(|id| model.index_of(*id).is_some());
            if !any_known && !movies.is_empty() {
                println!(
                    "{}",
                    "None of those ids are in the catalog — showing a random sample instead."
                        .yellow()
                );
            }

            let results = marquee::engine::content::similar_to(&model, &movies, &seeds, top_n);
            marquee::output::terminal::display_movie_list("Similar Movies", &results);
        }

        Commands::AlsoWatched { user_id, top_n } => {
            let db = marquee::db::open(&config.db_path)?;
            let movies = db.list_movies().await?;
            let interactions = db.list_interactions().await?;

            let results =
                marquee::engine::collaborative::also_watched(&movies, &interactions, user_id, top_n);
            if results.is_empty() {
                println!("No overlapping viewers yet — record some interactions first.");
            } else {
                marquee::output::terminal::display_movie_list("Viewers Also Watched", &results);
            }
        }

        Commands::Profile { user_id } => {
            let db = marquee::db::open(&config.db_path)?;

            match db.get_user(user_id).await? {
                Some(user) => println!("Genre profile for {} (user {user_id})", user.username.bold()),
                None => println!("Genre profile for user {user_id} (not registered)"),
            }

            let movies = db.list_movies().await?;
            let interactions = db.list_interactions().await?;
            let searches = db.list_searches().await?;

            let profile = marquee::engine::profile::build_genre_profile(
                &movies,
                &interactions,
                &searches,
                user_id,
                &marquee::engine::profile::ProfileWeights::default(),
            );
            profile.display();

            let interests =
                marquee::engine::profile::top_interests(&movies, &interactions, user_id, 5);
            if !interests.is_empty() {
                println!("Top interests: {}", interests.join(", "));
            }
        }

        Commands::Watch {
            user_id,
            movie_id,
            seconds,
        } => {
            let db = marquee::db::open(&config.db_path)?;
            let Some(movie) = db.get_movie(movie_id).await? else {
                anyhow::bail!("No movie with id {movie_id} in the catalog");
            };

            db.record_interaction(user_id, movie_id, InteractionKind::Watch, seconds)
                .await?;
            println!("Recorded: watched \"{}\" for {seconds} seconds", movie.title);
            if seconds <= 60 {
                println!(
                    "{}",
                    "(watches of a minute or less don't influence the profile)".dimmed()
                );
            }
        }

        Commands::Like { user_id, movie_id } => {
            let db = marquee::db::open(&config.db_path)?;
            let Some(movie) = db.get_movie(movie_id).await? else {
                anyhow::bail!("No movie with id {movie_id} in the catalog");
            };

            db.record_interaction(user_id, movie_id, InteractionKind::Like, 0)
                .await?;
            println!("Recorded: liked \"{}\"", movie.title);
        }

        Commands::Dislike { user_id, movie_id } => {
            let db = marquee::db::open(&config.db_path)?;
            let Some(movie) = db.get_movie(movie_id).await? else {
                anyhow::bail!("No movie with id {movie_id} in the catalog");
            };

            db.record_interaction(user_id, movie_id, InteractionKind::Dislike, 0)
                .await?;
            println!("Recorded: disliked \"{}\"", movie.title);
        }

        Commands::Search { user_id, query } => {
            let db = marquee::db::open(&config.db_path)?;
            db.record_search(user_id, &query).await?;
            println!("Recorded search: \"{query}\"");
        }

        Commands::History { user_id } => {
            let db = marquee::db::open(&config.db_path)?;
            let entries = db.user_history(user_id).await?;
            marquee::output::terminal::display_history(&entries);
        }

        Commands::Trending => {
            let db = marquee::db::open(&config.db_path)?;
            let ranked = db.trending(10).await?;
            marquee::output::terminal::display_trending(&ranked);
        }

        Commands::Movies { genre } => {
            let db = marquee::db::open(&config.db_path)?;
            let movies = db.browse_movies(genre.as_deref()).await?;
            let heading = match &genre {
                Some(g) => format!("Catalog: {g}"),
                None => "Catalog".to_string(),
            };
            marquee::output::terminal::display_movie_list(&heading, &movies);
        }

        Commands::Status => {
            let db = marquee::db::open(&config.db_path)?;
            marquee::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}
