use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Loads a `.env` file into the process environment.
///
/// Must run before [`Args::parse`] so the `env =` fallbacks below see its
/// values. Variables already set in the environment are left alone.
pub fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(p) => dotenvy::from_path(p).ok().map(|_| p.to_path_buf()),
        None => dotenvy::dotenv().ok(),
    }
}

/// CineBot: movie recommender and film-buff chat backed by Gemini
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the configuration file (defaults to ~/.config/cinebot/config.toml)
    #[arg(short, long, global = true, env = "CINEBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the Gemini model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CINEBOT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the interactive session (default)
    Interactive {
        /// Show the program's source before the menu
        #[arg(long, default_value_t = false)]
        show_source: bool,
    },

    /// Generate three recommendations and print them
    Recommend {
        /// Genre to mix in; repeat for several (e.g. -g Comedia -g Sci-Fi)
        #[arg(short, long = "genre", required = true)]
        genres: Vec<String>,

        /// Earliest release year
        #[arg(long, default_value_t = 1990)]
        min_year: u16,

        /// Latest release year
        #[arg(long, default_value_t = 2020)]
        max_year: u16,
    },

    /// Ask a free-form film question
    Ask {
        /// The question; words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// List the available genres
    Genres,

    /// Print the program's own source
    Source,
}
