use directories::ProjectDirs;
use std::path::PathBuf;
use std::fs;
use anyhow::{Result, Context};
use colored::Colorize;
use serde::{Serialize, Deserialize};

pub const DEFAULT_INDEX_URL: &str = "https://nodejs.org/dist/";

/// Where downloaded packages live between runs.
#[derive(Debug, Clone)]
pub enum CacheSetting {
    /// Reuse downloads with the same filename from this directory.
    Dir(PathBuf),
    /// Download into a temporary directory that is removed once the
    /// package has been consumed.
    Disabled,
}

/// Settings for a single invocation. Built once by the CLI layer and passed
/// by reference into every resolver and fetcher call; nothing mutates it
/// afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub verbose: bool,
    pub index_url: String,
    pub cache: CacheSetting,
}

impl Config {
    pub fn debug(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "debug:".blue(), message);
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct State {
    pub installed_version: Option<String>,
}

pub struct GrabDirs {
    pub config_dir: PathBuf,
    /// The managed runtime prefix. Its existence means Node is installed.
    pub node_dir: PathBuf,
    pub cache_dir: PathBuf,
}

pub fn get_dirs() -> Result<GrabDirs> {
    let project_dirs = ProjectDirs::from("com", "node-grab", "node-grab")
        .context("Failed to determine project directories")?;

    let config_dir = project_dirs.config_dir().to_path_buf();
    let node_dir = project_dirs.data_dir().join("node");
    let cache_dir = project_dirs.cache_dir().join("packages");

    fs::create_dir_all(&config_dir)?;

    Ok(GrabDirs {
        config_dir,
        node_dir,
        cache_dir,
    })
}

pub fn load_state() -> Result<State> {
    let dirs = get_dirs()?;
    let state_path = dirs.config_dir.join("config.json");

    if state_path.exists() {
        let content = fs::read_to_string(&state_path)?;
        let state = serde_json::from_str(&content)?;
        Ok(state)
    } else {
        Ok(State::default())
    }
}

pub fn save_state(state: &State) -> Result<()> {
    let dirs = get_dirs()?;
    let state_path = dirs.config_dir.join("config.json");

    let content = serde_json::to_string_pretty(state)?;
    fs::write(&state_path, content)?;

    Ok(())
}

#[cfg(test)]
pub fn test_config() -> Config {
    Config {
        verbose: false,
        index_url: DEFAULT_INDEX_URL.to_string(),
        cache: CacheSetting::Disabled,
    }
}
