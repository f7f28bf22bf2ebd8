mod commands;
mod error;
mod model;
mod util;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use inquire::Select;
use tracing::info;

/// Program to install Minecraft modpacks into the vanilla launcher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Minecraft directory to install into (defaults to ~/.minecraft)
    #[arg(short, long, global = true)]
    minecraft_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a modpack archive and install it as a new instance
    Archive {
        /// Direct download URL ending with .zip
        #[arg(short, long)]
        url: Option<String>,

        /// Name for the modpack profile
        #[arg(short, long)]
        name: Option<String>,

        /// Minecraft version to record in the profile
        #[arg(long)]
        mc_version: Option<String>,
    },
    /// Download every mod linked from a local HTML document
    Html {
        /// Path to the local HTML file containing mod links
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Name for the modpack profile
        #[arg(short, long)]
        name: Option<String>,

        /// Minecraft version to record in the profile
        #[arg(long)]
        mc_version: Option<String>,
    },
    /// List profiles registered in launcher_profiles.json
    List,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InstallMethod {
    ArchiveUrl,
    HtmlDocument,
}

impl std::fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InstallMethod::ArchiveUrl => write!(f, "Install from a direct download link"),
            InstallMethod::HtmlDocument => write!(f, "Install from an HTML document"),
        }
    }
}

async fn menu(minecraft_dir: &Path) -> Result<()> {
    let method = Select::new(
        "Choose an installation method:",
        vec![InstallMethod::ArchiveUrl, InstallMethod::HtmlDocument],
    )
    .prompt()?;
    match method {
        InstallMethod::ArchiveUrl => commands::archive(minecraft_dir, None, None, None).await,
        InstallMethod::HtmlDocument => commands::html(minecraft_dir, None, None, None).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!(
        "Starting mcpackinstaller version {}",
        env!("CARGO_PKG_VERSION")
    );
    let args = Args::parse();
    let minecraft_dir = match args.minecraft_dir {
        Some(dir) => dir,
        None => util::get_minecraft_dir()?,
    };
    match args.command {
        Some(Command::Archive {
            url,
            name,
            mc_version,
        }) => commands::archive(&minecraft_dir, url, name, mc_version).await,
        Some(Command::Html {
            file,
            name,
            mc_version,
        }) => commands::html(&minecraft_dir, file, name, mc_version).await,
        Some(Command::List) => commands::list(&minecraft_dir),
        None => menu(&minecraft_dir).await,
    }
}
