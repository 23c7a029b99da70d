//! Fetch the full Hipparcos catalogue on first start.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::{SkyMapError, SkyMapResult};

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Download `url` to `path` unless the file already exists.
///
/// The body is written to a sibling `.part` file first and renamed into
/// place, so an interrupted download never leaves a truncated catalogue.
///
/// # Returns
/// * `Ok(true)` - The catalogue was downloaded
/// * `Ok(false)` - `path` already existed
/// * `Err(SkyMapError::Catalog)` - The request or the write failed
pub async fn ensure_catalog(path: &Path, url: &str) -> SkyMapResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    info!("Downloading star catalog from {} to {}", url, path.display());

    let fail = |message: String| SkyMapError::catalog(path, 0, message);

    let client = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| fail(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fail(format!("Failed to request {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fail(format!("Catalog download failed ({}) from {}", status, url)));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| fail(format!("Failed to read catalog body: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let partial = path.with_extension("part");
    tokio::fs::write(&partial, &body).await?;
    tokio::fs::rename(&partial, path).await?;

    info!("Saved {} bytes to {}", body.len(), path.display());
    Ok(true)
}
