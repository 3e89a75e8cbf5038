//! Radio Tracks Library
//!
//! This library resolves free-text radio playlist entries (artist and title as
//! announced by a station) to Spotify track identifiers. Resolution goes through
//! a persistent, content-addressed cache first and only falls back to a chain of
//! Spotify search strategies for pairs it has never seen.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Track cache, its periodic flusher and token management
//! - `matching` - Search strategy chain and the search capability trait
//! - `resolver` - Cache-first track resolution
//! - `spotify` - Spotify Web API search client
//! - `types` - Data structures and type definitions
//! - `utils` - Track hashing and text normalization helpers

pub mod cli;
pub mod config;
pub mod management;
pub mod matching;
pub mod resolver;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias used by the command-line layer.
///
/// Library modules return their own typed errors (`CacheError`, `SearchError`,
/// `ResolveError`, `ConfigError`); the CLI boxes them into this alias so a
/// command can mix them freely with `?`.
///
/// # Example
///
/// ```
/// use radiotracks::Res;
///
/// async fn load_entries() -> Res<usize> {
///     Ok(0)
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Resolving {} playlist entries", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark, for completed operations.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and terminates the process with exit code 1.
///
/// Only for failures a command cannot recover from. Anything that owns a
/// running `CacheFlusher` must shut it down before reaching this macro,
/// otherwise the last flush interval is lost.
///
/// ```
/// error!("Missing required environment variable: {}", name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for recoverable problems.
///
/// ```
/// warning!("No Spotify match for '{}' - '{}'", artist, title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
