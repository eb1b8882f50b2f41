pub mod links;
pub mod package;
pub mod platform;
pub mod version;

use std::path::Path;

use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use package::PackageName;
use version::Version;

/// LTS release lines by codename, case-insensitive.
const LTS_CODENAMES: &[(&str, u32)] = &[
    ("argon", 4),
    ("boron", 6),
    ("carbon", 8),
    ("dubnium", 10),
    ("erbium", 12),
    ("fermium", 14),
    ("gallium", 16),
    ("hydrogen", 18),
    ("iron", 20),
    ("jod", 22),
    ("krypton", 24),
];

/// One requested platform/arch/format tag. Only explicitly requested values
/// can conflict with a package the user named directly; detected values just
/// narrow the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Explicit(String),
    Detected(String),
    Any,
}

impl Pick {
    pub fn value(&self) -> Option<&str> {
        match self {
            Pick::Explicit(value) | Pick::Detected(value) => Some(value),
            Pick::Any => None,
        }
    }

    fn explicit(&self) -> Option<&str> {
        match self {
            Pick::Explicit(value) => Some(value),
            _ => None,
        }
    }

    fn matches(&self, actual: &str) -> bool {
        self.value().map_or(true, |value| value == actual)
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    pub platform: Pick,
    pub arch: Pick,
    pub format: Pick,
}

impl Selection {
    /// Explicit values win over detection. With detection off, anything not
    /// given explicitly stays a wildcard.
    pub fn new(
        platform: Option<String>,
        arch: Option<String>,
        format: Option<String>,
        detect: bool,
    ) -> Selection {
        fn pick(explicit: Option<String>, detected: Option<String>) -> Pick {
            match (explicit, detected) {
                (Some(value), _) => Pick::Explicit(value),
                (None, Some(value)) => Pick::Detected(value),
                (None, None) => Pick::Any,
            }
        }

        let platform = pick(platform, detect.then(platform::host_platform));
        let arch = pick(arch, detect.then(platform::host_arch));
        // the preferred format follows whichever platform won above
        let format = pick(
            format,
            platform
                .value()
                .filter(|_| detect)
                .map(|p| platform::default_format(p).to_string()),
        );

        Selection {
            platform,
            arch,
            format,
        }
    }

    pub fn matches(&self, name: &PackageName) -> bool {
        self.platform.matches(&name.platform)
            && self.arch.matches(&name.arch)
            && self.format.matches(&name.format)
    }

    fn describe(&self) -> String {
        format!(
            "{}-{} in {} format",
            self.platform.value().unwrap_or("any"),
            self.arch.value().unwrap_or("any"),
            self.format.value().unwrap_or("any")
        )
    }
}

/// The resolver's final answer: one concrete location and its parsed name.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub location: String,
    pub name: PackageName,
}

/// Turn a hint into exactly one installable package.
///
/// Interpretations are tried in a fixed order, each one an explicit check
/// rather than error-driven fallthrough: a package file or URL, a listable
/// index location, a version expression, an LTS codename, and finally -- with
/// no hint at all -- the newest version the index offers.
pub fn resolve(config: &Config, hint: Option<&str>, selection: &Selection) -> Result<ResolvedPackage> {
    match hint {
        Some(hint) if package::has_package_suffix(hint) => {
            resolve_package_location(config, hint, selection)
        }
        Some(hint) if is_index_location(hint) => select_package(config, hint, selection),
        Some(hint) => {
            if let Ok(pattern) = Version::parse(hint) {
                resolve_version(config, Some(pattern), selection)
            } else if let Some(major) = lts_major(hint) {
                config.debug(&format!("{:?} names the v{} LTS line", hint, major));
                let pattern = Version {
                    major,
                    minor: None,
                    patch: None,
                };
                resolve_version(config, Some(pattern), selection)
            } else {
                Err(Error::InvalidHint(hint.to_string()))
            }
        }
        None => resolve_version(config, None, selection),
    }
}

pub fn lts_major(name: &str) -> Option<u32> {
    LTS_CODENAMES
        .iter()
        .find(|(codename, _)| codename.eq_ignore_ascii_case(name))
        .map(|(_, major)| *major)
}

/// Last path segment of a link, ignoring a trailing slash.
pub(crate) fn link_basename(link: &str) -> &str {
    link.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(link)
}

fn is_index_location(hint: &str) -> bool {
    if let Ok(url) = Url::parse(hint) {
        if matches!(url.scheme(), "http" | "https") {
            return true;
        }
    }
    Path::new(hint).exists()
}

/// The hint already names a package; validate it against what was explicitly
/// asked for instead of silently substituting.
fn resolve_package_location(
    config: &Config,
    location: &str,
    selection: &Selection,
) -> Result<ResolvedPackage> {
    let name = package::parse_package_name(link_basename(location))?;

    let checks = [
        ("platform", &selection.platform, &name.platform),
        ("architecture", &selection.arch, &name.arch),
        ("format", &selection.format, &name.format),
    ];
    for (field, pick, actual) in checks {
        if let Some(requested) = pick.explicit() {
            if requested != actual.as_str() {
                return Err(Error::PackageMismatch {
                    name: name.filename.clone(),
                    field,
                    requested: requested.to_string(),
                    actual: actual.clone(),
                });
            }
        }
    }

    config.debug(&format!("{:?} is already a package", location));
    Ok(ResolvedPackage {
        location: location.to_string(),
        name,
    })
}

/// List a location and keep the entries that are packages matching the
/// selection. Zero matches and multiple matches both fail; the user narrows
/// the hint rather than the tool guessing from listing order.
fn select_package(config: &Config, location: &str, selection: &Selection) -> Result<ResolvedPackage> {
    let entries = links::list_links(config, location)?;

    let mut candidates: Vec<ResolvedPackage> = Vec::new();
    for entry in entries {
        if let Ok(name) = package::parse_package_name(link_basename(&entry)) {
            if selection.matches(&name) {
                candidates.push(ResolvedPackage {
                    location: entry,
                    name,
                });
            }
        }
    }

    match candidates.len() {
        0 => Err(Error::NoMatch(format!(
            "a {} package at {:?}",
            selection.describe(),
            location
        ))),
        1 => {
            let resolved = candidates.remove(0);
            config.debug(&format!("selected {:?}", resolved.location));
            Ok(resolved)
        }
        _ => Err(Error::Ambiguous(
            candidates.into_iter().map(|c| c.location).collect(),
        )),
    }
}

/// Resolve a version pattern (or, with no pattern, any version at all) to a
/// package from the newest matching version directory of the index.
fn resolve_version(
    config: &Config,
    pattern: Option<Version>,
    selection: &Selection,
) -> Result<ResolvedPackage> {
    let entries = links::list_links(config, &config.index_url)?;

    let mut versions: Vec<(Version, String)> = entries
        .into_iter()
        .filter_map(|link| {
            // index roots list plenty of non-version entries (latest/, npm/,
            // checksum files); those simply don't parse
            Version::parse(link_basename(&link)).ok().map(|v| (v, link))
        })
        .filter(|(version, _)| pattern.as_ref().map_or(true, |p| p.matches(version)))
        .collect();

    if versions.is_empty() {
        let what = match &pattern {
            Some(pattern) => format!("version {} at {:?}", pattern, config.index_url),
            None => format!("any version at {:?}", config.index_url),
        };
        return Err(Error::NoMatch(what));
    }

    versions.sort_by(|a, b| b.0.cmp(&a.0));
    let (newest, link) = versions.into_iter().next().expect("checked non-empty");
    config.debug(&format!("newest matching version is {}", newest));

    select_package(config, &link, selection)
}
