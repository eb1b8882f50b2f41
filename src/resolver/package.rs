use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::resolver::version::Version;

/// Suffixes the Node distribution index serves as installable or
/// downloadable packages.
pub const PACKAGE_SUFFIXES: &[&str] = &[".gz", ".msi", ".pkg", ".xz", ".zip"];

// <platform> and <arch> are the longest runs of non-hyphen, non-dot
// characters, so <format> keeps compound suffixes like "tar.gz" whole.
static PACKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^node-v(?P<version>[^-]+)-(?P<platform>[^-.]+)-(?P<arch>[^-.]+)\.(?P<format>.+)$")
        .unwrap()
});

/// A package filename decomposed against the vendor naming convention
/// `node-v<version>-<platform>-<arch>.<format>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageName {
    pub version: Version,
    pub platform: String,
    pub arch: String,
    pub format: String,
    pub filename: String,
}

/// Whether a link or filename ends with one of the known package suffixes.
/// Anything else is treated as a listable index.
pub fn has_package_suffix(link: &str) -> bool {
    PACKAGE_SUFFIXES
        .iter()
        .any(|suffix| link.ends_with(suffix))
}

pub fn parse_package_name(filename: &str) -> Result<PackageName> {
    if !has_package_suffix(filename) {
        return Err(Error::UnknownPackageSuffix(filename.to_string()));
    }

    let caps = PACKAGE_RE
        .captures(filename)
        .ok_or_else(|| Error::MalformedPackageName(filename.to_string()))?;

    let version = Version::parse(&caps["version"])
        .map_err(|_| Error::MalformedPackageName(filename.to_string()))?;

    Ok(PackageName {
        version,
        platform: caps["platform"].to_string(),
        arch: caps["arch"].to_string(),
        format: caps["format"].to_string(),
        filename: filename.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_regular_package_name() {
        let name = parse_package_name("node-v8.1.2-darwin-x64.tar.gz").unwrap();
        assert_eq!(Version::parse("8.1.2").unwrap(), name.version);
        assert_eq!("darwin", name.platform);
        assert_eq!("x64", name.arch);
        assert_eq!("tar.gz", name.format, "format must keep the compound suffix");
        assert_eq!("node-v8.1.2-darwin-x64.tar.gz", name.filename);
    }

    #[test]
    fn parses_other_formats() {
        let msi = parse_package_name("node-v8.1.2-win-x64.msi").unwrap();
        assert_eq!("win", msi.platform);
        assert_eq!("msi", msi.format);

        let zip = parse_package_name("node-v6.11.0-win-x86.zip").unwrap();
        assert_eq!("x86", zip.arch);
        assert_eq!("zip", zip.format);
    }

    #[test]
    fn unknown_suffix_and_bad_grammar_are_distinct_failures() {
        assert!(matches!(
            parse_package_name("node-v8.1.2-darwin-x64"),
            Err(Error::UnknownPackageSuffix(_))
        ));
        assert!(matches!(
            parse_package_name("foobar-v8.1.2-darwin-x64.tar.gz"),
            Err(Error::MalformedPackageName(_))
        ));
        // headers tarballs carry a known suffix but are not install packages
        assert!(matches!(
            parse_package_name("node-v6.11.0-headers.tar.xz"),
            Err(Error::MalformedPackageName(_))
        ));
        // the embedded version has to parse too
        assert!(matches!(
            parse_package_name("node-vNaN-linux-x64.tar.gz"),
            Err(Error::MalformedPackageName(_))
        ));
    }

    #[test]
    fn package_suffix_detection() {
        assert!(has_package_suffix("v4.tar.gz"));
        assert!(has_package_suffix("v5.zip"));
        assert!(has_package_suffix("v6.xz"));
        assert!(!has_package_suffix("https://nodejs.org/dist/"));
        assert!(!has_package_suffix("v8.1.2"));
    }
}
