use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{CacheSetting, Config};
use crate::error::Result;
use crate::resolver::ResolvedPackage;

const DOWNLOAD_CHUNK_SIZE: usize = 10 * 1024;

/// A package sitting on local disk, ready to extract. When caching is
/// disabled the backing temporary directory is owned here, so the file lives
/// exactly as long as its consumer holds this value.
pub struct FetchedPackage {
    path: PathBuf,
    _temp: Option<TempDir>,
}

impl FetchedPackage {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Bring a resolved package onto local disk: reuse a cached file with the
/// same name, copy a local source, or stream the download into a temp file
/// that is renamed into place only on full success.
pub fn fetch(config: &Config, resolved: &ResolvedPackage) -> Result<FetchedPackage> {
    let (dir, temp) = match &config.cache {
        CacheSetting::Dir(dir) => {
            fs::create_dir_all(dir)?;
            (dir.clone(), None)
        }
        CacheSetting::Disabled => {
            let temp = tempfile::tempdir()?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };

    let target = dir.join(&resolved.name.filename);

    if temp.is_none() && target.is_file() {
        println!("Using cached {}", target.display());
        return Ok(FetchedPackage {
            path: target,
            _temp: None,
        });
    }

    let source = Path::new(&resolved.location);
    if source.is_file() {
        println!("Copying {}", source.display());
        fs::copy(source, &target)?;
    } else {
        download_file(config, &resolved.location, &dir, &target)?;
    }

    Ok(FetchedPackage {
        path: target,
        _temp: temp,
    })
}

fn download_file(config: &Config, url: &str, dir: &Path, target: &Path) -> Result<()> {
    println!("Downloading {}", url);

    let client = Client::new();
    let mut response = client.get(url).send()?.error_for_status()?;

    let progress = match response.content_length() {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .unwrap()
                .progress_chars("#>-"));
            bar
        }
        // no Content-Length, no percentage
        None => ProgressBar::new_spinner(),
    };

    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string());
    let mut temp_file = tempfile::Builder::new()
        .prefix(&format!("{}.download-", name))
        .tempfile_in(dir)?;
    config.debug(&format!("downloading to temp file {:?}", temp_file.path()));

    let mut buffer = [0u8; DOWNLOAD_CHUNK_SIZE];
    loop {
        let read = response.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        temp_file.write_all(&buffer[..read])?;
        progress.inc(read as u64);
    }
    temp_file.flush()?;
    progress.finish_with_message("Download complete");

    config.debug(&format!("renaming {:?} to {:?}", temp_file.path(), target));
    temp_file.persist(target).map_err(|e| e.error)?;

    Ok(())
}
