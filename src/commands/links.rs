use anyhow::Result;

use crate::config::Config;
use crate::resolver::links;

pub fn execute(config: &Config, location: &str) -> Result<()> {
    println!("Reading links from {}", location);

    for link in links::list_links(config, location)? {
        println!("{}", link);
    }

    Ok(())
}
