use std::fs::{self, File};
use std::io;
use std::path::Path;

use log::{info, warn};
use reqwest::header::CONTENT_TYPE;

use crate::error::{ExplorerError, Result};

/// Downloads `url` to `path` unless a file is already there. The body lands
/// in a sibling `.part` file first and only replaces `path` once complete.
pub fn ensure_dataset(path: &Path, url: &str) -> Result<()> {
    if path.is_file() {
        info!("using dataset at {}", path.display());
        return Ok(());
    }

    info!("{} not found, downloading {}", path.display(), url);
    let partial = path.with_extension("part");
    match download(url, &partial) {
        Ok(bytes) => {
            fs::rename(&partial, path)?;
            info!("wrote {} bytes to {}", bytes, path.display());
            Ok(())
        }
        Err(err) => {
            if partial.exists() {
                warn!("removing incomplete download {}", partial.display());
                fs::remove_file(&partial)?;
            }
            Err(err)
        }
    }
}

fn download(url: &str, to: &Path) -> Result<u64> {
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    // Drive answers large files with an HTML confirmation page.
    if let Some(content_type) = response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        if content_type.starts_with("text/html") {
            return Err(ExplorerError::UnexpectedContent(content_type.to_string()));
        }
    }
    let mut file = File::create(to)?;
    let bytes = io::copy(&mut response, &mut file)?;
    file.sync_all()?;
    Ok(bytes)
}
