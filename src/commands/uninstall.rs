use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use std::fs;
use std::io;

use crate::config;

pub fn execute(yes: bool) -> Result<()> {
    let dirs = config::get_dirs()?;

    if !yes {
        let prompt = format!(
            "This will remove {} and its bundled node_modules, continue?",
            dirs.node_dir.display()
        );
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            println!("Aborted");
            return Ok(());
        }
    }

    match fs::remove_dir_all(&dirs.node_dir) {
        Ok(()) => {
            println!("Removed {}", dirs.node_dir.display().to_string().green());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            println!("Node is not installed, nothing to remove");
        }
        Err(e) => return Err(e.into()),
    }

    let mut state = config::load_state()?;
    state.installed_version = None;
    config::save_state(&state)?;

    Ok(())
}
