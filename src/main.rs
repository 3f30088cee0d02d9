use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use musicfinder::{cli, config, error, management::SampleFilter, types::PkceToken};
use tokio::sync::Mutex;

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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Run the HTTP API
    Serve,

    /// Find album and track mentions in a text file or stdin
    Extract(ExtractOptions),

    /// Find mentions in a YouTube video or web page
    Parse(ParseOptions),

    /// Manage the sample vault
    Samples(SamplesOptions),

    /// Manage downloaded MP3 files
    Downloads(DownloadsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractOptions {
    /// Read from this file instead of stdin
    #[clap(long)]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ParseOptions {
    /// YouTube video or web page URL
    pub url: String,

    /// Create a Spotify playlist from the mentions
    #[clap(long)]
    pub playlist: bool,

    /// Download every mention as MP3 via yt-dlp
    #[clap(long)]
    pub download: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SamplesOptions {
    #[command(subcommand)]
    pub command: SamplesSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SamplesSubcommand {
    /// Add a track to the vault (replaces an entry with the same id)
    Add(SamplesAddOpts),

    /// Remove a track from the vault
    Remove { id: String },

    /// List the vault
    List {
        /// all, downloaded or pending
        #[clap(long, default_value = "all")]
        filter: SampleFilter,
    },

    /// Download a vault entry as MP3
    Download { id: String },

    /// Look up what a vault entry samples
    Lookup { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct SamplesAddOpts {
    /// Track id, used as download file name prefix
    #[clap(long)]
    pub id: String,

    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub artist: String,

    #[clap(long)]
    pub album: Option<String>,

    /// Spotify track URI (spotify:track:...)
    #[clap(long)]
    pub uri: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadsOptions {
    #[command(subcommand)]
    pub command: DownloadsSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DownloadsSubcommand {
    /// List downloaded files
    List,

    /// Delete a downloaded file
    Delete { filename: String },
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Serve => cli::serve().await,
        Command::Extract(opt) => cli::extract(opt.file).await,
        Command::Parse(opt) => cli::parse(opt.url, opt.playlist, opt.download).await,

        Command::Samples(opt) => match opt.command {
            SamplesSubcommand::Add(a) => {
                cli::add_sample(cli::NewSample {
                    id: a.id,
                    name: a.name,
                    artist: a.artist,
                    album: a.album,
                    uri: a.uri,
                })
                .await
            }
            SamplesSubcommand::Remove { id } => cli::remove_sample(id).await,
            SamplesSubcommand::List { filter } => cli::list_samples(filter).await,
            SamplesSubcommand::Download { id } => cli::download_sample(id).await,
            SamplesSubcommand::Lookup { id } => cli::lookup_sample(id).await,
        },

        Command::Downloads(opt) => match opt.command {
            DownloadsSubcommand::List => cli::list_downloads().await,
            DownloadsSubcommand::Delete { filename } => cli::delete_download(filename).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
