use std::env;

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered (pattern, canonical) rules. First match wins; values that match
/// nothing pass through lowercased, so hardware the table has never heard of
/// still resolves against package filenames that name it verbatim.
type Rules = Vec<(Regex, &'static str)>;

fn rules(table: &[(&str, &'static str)]) -> Rules {
    table
        .iter()
        .map(|(pattern, canonical)| (Regex::new(pattern).unwrap(), *canonical))
        .collect()
}

static PLATFORM_RULES: Lazy<Rules> = Lazy::new(|| {
    rules(&[
        (r"^windows$", "win"),
        (r"^macos$", "darwin"),
        (r"^(solaris|illumos)$", "sunos"),
        // aix and linux already carry the canonical names
    ])
});

static ARCH_RULES: Lazy<Rules> = Lazy::new(|| {
    rules(&[
        // more specific patterns first: x86_64 must not be caught by the
        // bare x86 family rule below
        (r"^x86[^\d]64$", "x64"),
        (r"^amd64$", "x64"),
        (r"^i[3-6]86$", "x86"),
        (r"^x86([^\d]|$)", "x86"),
        (r"^(aarch64|arm64)$", "arm64"),
        (r"^(powerpc64le|ppc64le)$", "ppc64le"),
        (r"^(powerpc64|ppc64|ppc|power macintosh)$", "ppc64"),
        (r"^s390x?$", "s390x"),
        // armv6l / armv7l pass through unchanged
    ])
});

fn map_rules(rules: &Rules, value: &str) -> Option<String> {
    let value = value.to_lowercase();
    rules
        .iter()
        .find(|(pattern, _)| pattern.is_match(&value))
        .map(|(_, canonical)| canonical.to_string())
}

/// Canonical platform tag for a raw OS name (e.g. "macos" -> "darwin").
pub fn canonical_platform(os: &str) -> String {
    map_rules(&PLATFORM_RULES, os).unwrap_or_else(|| os.to_lowercase())
}

/// Canonical architecture tag for a raw machine string. When the machine
/// string matches no rule, a processor string (the secondary identifier some
/// systems report, e.g. "Power Macintosh") is tried against the same table
/// before the machine string falls through unchanged.
pub fn canonical_arch(machine: &str, processor: Option<&str>) -> String {
    if let Some(mapped) = map_rules(&ARCH_RULES, machine) {
        return mapped;
    }
    if let Some(mapped) = processor.and_then(|p| map_rules(&ARCH_RULES, p)) {
        return mapped;
    }
    machine.to_lowercase()
}

/// The archive format the vendor prefers for a platform.
pub fn default_format(platform: &str) -> &'static str {
    if platform == "win" {
        "zip"
    } else {
        "tar.gz"
    }
}

pub fn host_platform() -> String {
    canonical_platform(env::consts::OS)
}

pub fn host_arch() -> String {
    canonical_arch(env::consts::ARCH, None)
}
