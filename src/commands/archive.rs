use std::fs;
use std::path::Path;

use colored::Colorize;
use tracing::info;

use super::{profile, util};
use crate::error::InstallError;
use crate::Result as CrateResult;

/// Subfolders a pack archive may carry at its root. Their contents are
/// relocated into the instance's nested minecraft directory.
const RELOCATED_SUBDIRS: [&str; 3] = ["mods", "config", "libraries"];

pub async fn archive(
    minecraft_dir: &Path,
    url: Option<String>,
    name: Option<String>,
    mc_version: Option<String>,
) -> CrateResult<()> {
    let pack_name = match name {
        Some(name) => name,
        None => util::prompt_pack_name()?,
    };
    let pack_url = match url {
        Some(url) => url,
        None => util::prompt_pack_url()?,
    };
    // The prompt already validates; this catches URLs passed on the
    // command line. Nothing has touched the filesystem yet.
    if !util::is_pack_url(&pack_url) {
        eprintln!(
            "{}",
            "Invalid direct download link. Please provide an http(s) URL ending with .zip.".red()
        );
        return Err(InstallError::InvalidPackUrl(pack_url).into());
    }

    install(minecraft_dir, &pack_url, &pack_name, mc_version).await?;

    println!(
        "Modpack '{}' installed successfully! Launch Minecraft and select the '{}' profile.",
        pack_name.bold().green(),
        pack_name.bold()
    );
    Ok(())
}

async fn install(
    minecraft_dir: &Path,
    pack_url: &str,
    pack_name: &str,
    mc_version: Option<String>,
) -> CrateResult<()> {
    let instance_dir = minecraft_dir.join("instances").join(pack_name);
    let game_dir = instance_dir.join("minecraft");
    fs::create_dir_all(&instance_dir)?;

    println!("Downloading modpack from {}...", pack_url);
    let client = util::build_http_client()?;
    let zip_path = instance_dir.join("pack.zip");
    util::download_file(&client, pack_url, &zip_path).await?;

    println!("Extracting modpack...");
    util::extract_zip(&zip_path, &instance_dir)?;

    for subdir in RELOCATED_SUBDIRS {
        let source = instance_dir.join(subdir);
        if source.is_dir() {
            info!("Moving {} into {}", subdir, game_dir.display());
        }
        util::move_dir_contents(&source, &game_dir.join(subdir))?;
    }

    let version = match mc_version {
        Some(version) => version,
        None => util::prompt_mc_version()?,
    };
    profile::update_registry(
        &crate::util::profiles_path(minecraft_dir),
        pack_name,
        &crate::util::absolute_path(&game_dir),
        &version,
    )
}
