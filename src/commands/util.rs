use std::fs;
use std::path::{Path, PathBuf};

use inquire::error::InquireResult;
use inquire::validator::{StringValidator, Validation};
use inquire::Text;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::InstallError;
use crate::Result as CrateResult;

const USER_AGENT: &str = concat!("mcpackinstaller/", env!("CARGO_PKG_VERSION"));

/// Link suffixes recognized as installable mod files.
pub const MOD_EXTENSIONS: [&str; 2] = [".jar", ".zip"];

/// A direct pack download link: http(s) scheme, path ending with .zip.
pub fn is_pack_url(input: &str) -> bool {
    match url::Url::parse(input) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.path().ends_with(".zip")
        }
        Err(_) => false,
    }
}

#[derive(Clone)]
pub struct PackUrlValidator {}

impl PackUrlValidator {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for PackUrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl StringValidator for PackUrlValidator {
    fn validate(
        &self,
        input: &str,
    ) -> Result<Validation, inquire::CustomUserError> {
        match url::Url::parse(input) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => Ok(
                Validation::Invalid("The link must use http or https".into()),
            ),
            Ok(parsed) if !parsed.path().ends_with(".zip") => Ok(Validation::Invalid(
                "The link must point directly at a .zip archive".into(),
            )),
            Ok(_) => Ok(Validation::Valid),
            Err(e) => Ok(Validation::Invalid(
                format!("Failed to validate URL: {}", e).as_str().into(),
            )),
        }
    }
}

pub fn prompt_pack_name() -> InquireResult<String> {
    Text::new("Pack name:")
        .with_validator(inquire::required!())
        .prompt()
}

pub fn prompt_pack_url() -> InquireResult<String> {
    Text::new("Direct download URL:")
        .with_placeholder("https://example.com/pack.zip")
        .with_help_message(
            "A direct link to the modpack zip, e.g. from a CurseForge file page",
        )
        .with_validator(inquire::required!())
        .with_validator(PackUrlValidator::default())
        .prompt()
}

pub fn prompt_html_path() -> InquireResult<PathBuf> {
    Text::new("Path to the local HTML file:")
        .with_validator(inquire::required!())
        .with_validator(|input: &str| {
            if Path::new(input).is_file() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("File not found".into()))
            }
        })
        .prompt()
        .map(PathBuf::from)
}

pub fn prompt_mc_version() -> InquireResult<String> {
    Text::new("Minecraft version for the modpack:")
        .with_placeholder("1.20.1")
        .with_validator(inquire::required!())
        .prompt()
}

pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Downloads `url` to `dest`, streaming the body chunk by chunk. A
/// non-success status is an error; nothing is written in that case.
pub async fn download_file(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> CrateResult<()> {
    debug!("Downloading {} to {}", url, dest.display());
    let mut response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(InstallError::DownloadFailed {
            url: url.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(dest).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// Extracts every entry of the archive into `dest`, creating directories as
/// needed. Entry names are resolved through `enclosed_name` so an archive
/// cannot write outside the destination.
pub fn extract_zip(zip_path: &Path, dest: &Path) -> CrateResult<()> {
    let zip_file = fs::File::open(zip_path)?;
    let mut archive = zip::ZipArchive::new(zip_file)?;

    for index in 0..archive.len() {
        let mut zipped = archive.by_index(index)?;
        let rel_path = match zipped.enclosed_name() {
            Some(rel_path) => rel_path,
            None => return Err(InstallError::UnsafeZipEntry(zipped.name().to_string()).into()),
        };
        let out_path = dest.join(rel_path);
        if zipped.name().ends_with('/') {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Extracting {}", out_path.display());
        let mut out = fs::File::create(&out_path)?;
        std::io::copy(&mut zipped, &mut out)?;
    }
    Ok(())
}

/// Moves every direct child of `src` into `dest`. The destination is always
/// created, even when `src` does not exist; existing entries with the same
/// name are replaced.
pub fn move_dir_contents(src: &Path, dest: &Path) -> CrateResult<()> {
    fs::create_dir_all(dest)?;
    if !src.is_dir() {
        return Ok(());
    }
    for entry in src.read_dir()? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        debug!(
            "Moving {} to {}",
            entry.path().display(),
            target.display()
        );
        fs::rename(entry.path(), &target)?;
    }
    Ok(())
}

/// The final path segment of a URL, used as the downloaded file's name.
pub fn file_name_from_url(link: &str) -> CrateResult<String> {
    let parsed = url::Url::parse(link)?;
    let name = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| InstallError::MissingFileName(link.to_string()))?;
    Ok(name.to_string())
}
