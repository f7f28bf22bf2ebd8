use crate::Result;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_unwrap::OptionExt;

pub fn get_minecraft_dir() -> Result<PathBuf> {
    let minecraft_dir = dirs::home_dir()
        .expect_or_log("Failed to get home directory")
        .join(".minecraft");
    debug!("Minecraft directory: {}", minecraft_dir.display());
    Ok(minecraft_dir)
}

pub fn profiles_path(minecraft_dir: &Path) -> PathBuf {
    minecraft_dir.join("launcher_profiles.json")
}

/// Canonicalizes a path so the launcher gets an absolute game directory,
/// falling back to the path as given when it does not exist yet.
pub fn absolute_path(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(p) => p,
        Err(_) => path.to_path_buf(),
    }
}
