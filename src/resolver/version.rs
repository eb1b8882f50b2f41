use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^v?(?P<major>\d+)(\.(?P<minor>\d+))?(\.(?P<patch>\d+))?$").unwrap()
});

/// A Node release version, possibly partial. A missing component is a
/// wildcard when the version is used as a match pattern, and simply absent
/// when it names a concrete release. `None` sorts below any `Some`, so the
/// derived ordering ranks `8 < 8.0 < 8.0.0 < 8.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
}

impl Version {
    pub fn parse(text: &str) -> Result<Version> {
        let caps = VERSION_RE
            .captures(text)
            .ok_or_else(|| Error::InvalidVersion(text.to_string()))?;

        let group = |name| -> Result<Option<u32>> {
            match caps.name(name) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map(Some)
                    .map_err(|_| Error::InvalidVersion(text.to_string())),
                None => Ok(None),
            }
        };

        Ok(Version {
            // "major" always captures when the regex matches
            major: group("major")?.unwrap(),
            minor: group("minor")?,
            patch: group("patch")?,
        })
    }

    /// Whether `concrete` satisfies `self` used as a pattern. A set pattern
    /// component must be matched exactly; an unset one matches anything.
    pub fn matches(&self, concrete: &Version) -> bool {
        fn component(pattern: Option<u32>, actual: Option<u32>) -> bool {
            match pattern {
                None => true,
                Some(n) => actual == Some(n),
            }
        }

        self.major == concrete.major
            && component(self.minor, concrete.minor)
            && component(self.patch, concrete.patch)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{}", minor)?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{}", patch)?;
        }
        Ok(())
    }
}
