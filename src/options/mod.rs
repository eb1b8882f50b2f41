pub mod version;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'V', long, action = ArgAction::SetTrue)]
    pub version: bool,

    /// Show each resolution step
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install Node of the latest version or from the given hint
    Install {
        /// Version (e.g. 8.1, v6.11.0), LTS codename (e.g. boron), package
        /// file or URL, or a directory or URL listing packages
        hint: Option<String>,

        /// Node index directory or URL
        #[arg(short = 'i', long = "index-url")]
        index_url: Option<String>,

        /// Directory to cache downloads
        #[arg(short = 'c', long = "cache-dir")]
        cache_dir: Option<PathBuf>,

        /// Do not cache downloads
        #[arg(long)]
        no_cache: bool,

        /// E.g. darwin, linux, win (default: current platform)
        #[arg(short, long)]
        platform: Option<String>,

        /// E.g. arm64, x64, x86 (default: current architecture)
        #[arg(short, long)]
        arch: Option<String>,

        /// E.g. tar.gz, zip (default: platform's preferred format)
        #[arg(short, long)]
        format: Option<String>,

        /// Detect platform, architecture and format (default)
        #[arg(long, overrides_with = "no_detect")]
        detect: bool,

        /// Leave values not given explicitly unconstrained
        #[arg(long = "no-detect", overrides_with = "detect")]
        no_detect: bool,
    },

    /// Remove the installed Node runtime
    Uninstall {
        /// Confirm uninstallation without prompting
        #[arg(long)]
        yes: bool,
    },

    /// List the versions available at the index
    List {
        /// Node index directory or URL
        #[arg(short = 'i', long = "index-url")]
        index_url: Option<String>,
    },

    /// Read and print the links of an index
    #[command(name = "read-links")]
    ReadLinks {
        /// Index directory, HTML file, or URL
        location: String,
    },
}
