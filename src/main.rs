use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// vsixget - VS Code extension downloader
///
/// Search the Visual Studio Code marketplace and download extension
/// packages (.vsix) to local disk.
///
/// Examples:
///   vsixget search python            # List extensions matching "python"
///   vsixget download python          # Download the first match
///   vsixget download python --pick 2 # Download the second match
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gallery API URL (defaults to the public marketplace gallery)
    #[arg(
        long = "gallery-url",
        value_name = "URL",
        env = "VSIXGET_GALLERY_URL",
        global = true
    )]
    pub gallery_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Search the marketplace by keyword
    Search(SearchArgs),

    /// Search, pick one result, and download its latest package
    Download(DownloadArgs),
}

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Free-text search query
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(clap::Args, Debug)]
pub struct DownloadArgs {
    /// Free-text search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// 1-based index of the search result to download
    #[arg(long, short = 'p', value_name = "N", default_value_t = 1)]
    pub pick: usize,

    /// Directory the package is saved into
    #[arg(long, value_name = "PATH", default_value = vsixget::download::DOWNLOAD_DIR)]
    pub output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => vsixget::commands::search(&args.query, cli.gallery_url).await?,
        Commands::Download(args) => {
            vsixget::commands::download(&args.query, args.pick, cli.gallery_url, args.output_dir)
                .await?
        }
    }
    Ok(())
}
