use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use radiotracks::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a single artist/title pair to a Spotify track
    Resolve(ResolveOptions),

    /// Resolve every entry of a scraped playlist file
    Batch(BatchOptions),

    /// Inspect the persisted track cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Artist as announced by the station
    #[clap(long)]
    pub artist: String,

    /// Title as announced by the station
    #[clap(long)]
    pub title: String,
}

#[derive(Parser, Debug, Clone)]
pub struct BatchOptions {
    /// JSON file with an array of {"artist", "title"} entries
    pub file: PathBuf,

    /// Only list entries without a Spotify match
    #[clap(long)]
    pub missing: bool,

    /// Number of entries resolved concurrently
    #[clap(long, default_value_t = 10)]
    pub chunk_size: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Show entry counts
    Stats,

    /// List cached tracks
    List(CacheListOpts),

    /// Write the cache content to another file
    Export(CacheExportOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct CacheListOpts {
    /// Filter by artist or title
    #[clap(long)]
    pub search: Option<String>,

    /// Only list tracks that were not found on Spotify
    #[clap(long)]
    pub missing: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheExportOpts {
    /// Target file
    pub file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("radiotracks=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Resolve(opt) => cli::resolve(opt.artist, opt.title).await,
        Command::Batch(opt) => cli::batch(opt.file, opt.missing, opt.chunk_size).await,
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::Stats => cli::cache_stats().await,
            CacheSubcommand::List(l) => cli::cache_list(l.search, l.missing).await,
            CacheSubcommand::Export(e) => cli::cache_export(e.file).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
