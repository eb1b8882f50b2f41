use anyhow::Result;
use colored::Colorize;

use crate::config::{self, Config};
use crate::resolver::links;
use crate::resolver::version::Version;

pub fn execute(config: &Config) -> Result<()> {
    println!("Fetching available Node.js versions...");

    let entries = links::list_links(config, &config.index_url)?;

    let mut versions: Vec<Version> = entries
        .iter()
        .filter_map(|link| Version::parse(crate::resolver::link_basename(link)).ok())
        .collect();

    if versions.is_empty() {
        println!("No available versions found");
        return Ok(());
    }

    versions.sort_by(|a, b| b.cmp(a));

    let state = config::load_state()?;

    println!("\nAvailable Node.js versions:");
    for (i, version) in versions.iter().enumerate() {
        if i == 30 {
            println!("  ... and more");
            break;
        }

        let text = version.to_string();
        if state.installed_version.as_deref() == Some(text.as_str()) {
            println!("* {} (installed)", text.green());
        } else {
            println!("  {}", text);
        }
    }

    Ok(())
}
