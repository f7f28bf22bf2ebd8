use thiserror::Error;

/// Failures specific to modpack installation. Everything else travels as a
/// boxed error through `crate::Result`.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("invalid direct download link (expected an http(s) URL ending with .zip): {0}")]
    InvalidPackUrl(String),

    #[error("download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("could not determine a file name for {0}")]
    MissingFileName(String),

    #[error("archive entry escapes the extraction directory: {0}")]
    UnsafeZipEntry(String),
}
