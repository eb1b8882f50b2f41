use anyhow::Result;
use colored::Colorize;
use std::fs;

use crate::config::{self, Config};
use crate::error::Error;
use crate::resolver::{self, Selection};
use crate::utils::{download, extract};

pub fn execute(config: &Config, hint: Option<&str>, selection: &Selection) -> Result<()> {
    let dirs = config::get_dirs()?;

    if dirs.node_dir.exists() {
        return Err(Error::AlreadyInstalled(dirs.node_dir).into());
    }

    let resolved = resolver::resolve(config, hint, selection)?;
    println!("Installing {}", resolved.name.filename.green());

    let fetched = download::fetch(config, &resolved)?;

    println!("Extracting into {}", dirs.node_dir.display());
    fs::create_dir_all(&dirs.node_dir)?;
    extract::extract_archive(config, fetched.path(), &dirs.node_dir)?;

    let mut state = config::load_state()?;
    state.installed_version = Some(resolved.name.version.to_string());
    config::save_state(&state)?;

    println!(
        "Successfully installed Node.js {}",
        resolved.name.version.to_string().green()
    );

    Ok(())
}
