mod commands;
mod config;
mod error;
mod options;
mod resolver;
mod utils;

use clap::{CommandFactory, Parser};
use colored::Colorize;

use config::{CacheSetting, Config};
use resolver::Selection;

fn main() {
    let cli = options::Cli::parse();
    let verbose = cli.verbose;

    if let Err(err) = run(cli) {
        if verbose {
            eprintln!("{} {:?}", "error:".red(), err);
        } else {
            eprintln!("{} {:#}", "error:".red(), err);
        }
        std::process::exit(1);
    }
}

fn run(cli: options::Cli) -> anyhow::Result<()> {
    if cli.version {
        options::version::show();
        return Ok(());
    }

    match cli.command {
        Some(options::Commands::Install {
            hint,
            index_url,
            cache_dir,
            no_cache,
            platform,
            arch,
            format,
            detect,
            no_detect,
        }) => {
            let cache = if no_cache {
                CacheSetting::Disabled
            } else if let Some(dir) = cache_dir {
                CacheSetting::Dir(dir)
            } else {
                CacheSetting::Dir(config::get_dirs()?.cache_dir)
            };
            let config = build_config(cli.verbose, index_url, cache);
            let selection = Selection::new(platform, arch, format, detect || !no_detect);
            commands::install::execute(&config, hint.as_deref(), &selection)?;
        }
        Some(options::Commands::Uninstall { yes }) => {
            commands::uninstall::execute(yes)?;
        }
        Some(options::Commands::List { index_url }) => {
            let config = build_config(cli.verbose, index_url, CacheSetting::Disabled);
            commands::list::execute(&config)?;
        }
        Some(options::Commands::ReadLinks { location }) => {
            let config = build_config(cli.verbose, None, CacheSetting::Disabled);
            commands::links::execute(&config, &location)?;
        }
        None => {
            let mut cmd = options::Cli::command();
            cmd.print_help()?;
            println!();
        }
    }

    Ok(())
}

fn build_config(verbose: bool, index_url: Option<String>, cache: CacheSetting) -> Config {
    Config {
        verbose,
        index_url: index_url.unwrap_or_else(|| config::DEFAULT_INDEX_URL.to_string()),
        cache,
    }
}
