use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{debug, info, warn};

use crate::model::{LauncherProfile, ProfileRegistry};
use crate::Result as CrateResult;

fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    PathBuf::from(backup)
}

/// Reads the registry document, starting from a default one when the file
/// is absent. A file that exists but does not decode is copied aside to
/// `<path>.bak` (replacing any prior backup) before falling back to the
/// default document; the corrupt original is never deleted.
pub fn load_registry(path: &Path) -> CrateResult<ProfileRegistry> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No registry at {}, starting fresh", path.display());
            return Ok(ProfileRegistry::default());
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str(&raw) {
        Ok(registry) => Ok(registry),
        Err(e) => {
            warn!("Failed to decode {}: {}", path.display(), e);
            let backup = backup_path(path);
            fs::copy(path, &backup)?;
            eprintln!(
                "{} could not be read; the old file was kept as {} and a new one will be written.",
                path.display(),
                backup.display().to_string().yellow()
            );
            Ok(ProfileRegistry::default())
        }
    }
}

/// Inserts (or overwrites) the profile for `pack_name` and writes the whole
/// document back pretty-printed.
pub fn update_registry(
    path: &Path,
    pack_name: &str,
    game_dir: &Path,
    version: &str,
) -> CrateResult<()> {
    info!("Updating launcher profile for {}", pack_name);
    let mut registry = load_registry(path)?;
    registry.profiles.insert(
        pack_name.to_string(),
        LauncherProfile::custom(pack_name, version, game_dir),
    );
    fs::write(path, serde_json::to_string_pretty(&registry)?)?;
    debug!(
        "Wrote {} profiles to {}",
        registry.profiles.len(),
        path.display()
    );
    Ok(())
}
