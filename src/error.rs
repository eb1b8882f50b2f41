use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::package::PACKAGE_SUFFIXES;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while resolving, fetching, or installing a
/// package. All variants are terminal for the current command; `main`
/// renders them once.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid version {0:?}, expected <major>[.<minor>[.<patch>]] with an optional leading 'v'")]
    InvalidVersion(String),

    #[error("invalid package name {0:?}, suffix must be one of {:?}", PACKAGE_SUFFIXES)]
    UnknownPackageSuffix(String),

    #[error("invalid package name {0:?}, it does not match node-v<version>-<platform>-<arch>.<format>")]
    MalformedPackageName(String),

    #[error("{0:?} is a package, it does not have links")]
    NotAnIndex(String),

    #[error("don't know what to do with {0:?}, expected a version, an LTS codename, a package file or URL, or an index directory or URL")]
    InvalidHint(String),

    #[error("package {name:?} has {field} {actual:?} but {requested:?} was requested")]
    PackageMismatch {
        name: String,
        field: &'static str,
        requested: String,
        actual: String,
    },

    #[error("could not find {0}, run 'node-grab list' to see the versions available")]
    NoMatch(String),

    #[error("more than one package found:\n  {}", .0.join("\n  "))]
    Ambiguous(Vec<String>),

    #[error("only tar.gz and zip packages can be installed, not {0:?}")]
    UnsupportedFormat(String),

    #[error("Node is already installed at {0:?}, run 'node-grab uninstall' first")]
    AlreadyInstalled(PathBuf),

    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}
