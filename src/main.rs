use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sprankcli::{cli, config, error, server, types::PkceToken};
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
    Auth(AuthOptions),

    /// Rank saved tracks and reconcile the configured playlists
    Sync(SyncOptions),

    /// Preview the top tracks for a metric without touching playlists
    Rank(RankOptions),

    /// Export the merged track table as tab-delimited text
    Export(ExportOptions),

    /// Information about the library and configured playlists
    Info(InfoOptions),

    /// Run the HTTP server for OAuth callbacks and on-demand syncs
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Use the app-only client-credentials grant instead of PKCE
    #[clap(long)]
    pub client_credentials: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Reconcile playlists for this user id instead of the token owner
    #[clap(long)]
    pub user: Option<String>,

    /// Only create missing playlists; never fill existing ones
    #[clap(long)]
    pub create_only: bool,

    /// Leave non-empty playlists unchanged instead of overwriting them
    #[clap(long)]
    pub no_overwrite: bool,

    /// Also write the merged record set to this path before deduping
    #[clap(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RankOptions {
    /// Metric to rank by (e.g. danceability, energy, popularity)
    #[clap(long)]
    pub metric: String,

    /// Number of tracks to show
    #[clap(long, default_value_t = 20)]
    pub num: usize,

    /// Rank ascending instead of descending
    #[clap(long)]
    pub ascending: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Output path (defaults to ./saved_tracks.tsv)
    #[clap(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoOptions {
    /// Show the remote saved-track count
    #[clap(long)]
    tracks: bool,

    /// Show the configured playlist specs
    #[clap(long)]
    specs: bool,
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
        Command::Auth(opt) => {
            if opt.client_credentials {
                cli::auth_client_credentials().await;
            } else {
                let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
                cli::auth(Arc::clone(&oauth_result)).await;
            }
        }

        Command::Sync(opt) => {
            cli::sync(opt.user, opt.create_only, opt.no_overwrite, opt.export).await
        }

        Command::Rank(opt) => cli::rank(opt.metric, opt.num, opt.ascending).await,

        Command::Export(opt) => cli::export(opt.output).await,

        Command::Info(opt) => cli::info(opt.tracks, opt.specs).await,

        Command::Serve => {
            let state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            server::start_api_server(state).await;
        }

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
