use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::resolver::package;

// Only anchor tags count. Quoted and bare attribute values both appear in
// real directory listings.
static HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*("([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap()
});

enum LinkBase<'a> {
    Url(&'a Url),
    File(&'a Path),
}

/// List the child links of an index location, in listing order.
///
/// The location is tried as a local directory, then as a local HTML file,
/// then as a URL; a missing path is not an error, the next strategy simply
/// gets its turn. Package files have no children and are rejected up front.
pub fn list_links(config: &Config, location: &str) -> Result<Vec<String>> {
    if package::has_package_suffix(location) {
        return Err(Error::NotAnIndex(location.to_string()));
    }

    config.debug(&format!("reading links from {:?}", location));

    let path = Path::new(location);

    if path.is_dir() {
        let mut links = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            links.push(entry.path().to_string_lossy().into_owned());
        }
        links.sort();
        return Ok(links);
    }

    if path.is_file() {
        let html = fs::read_to_string(path)?;
        return Ok(extract_links(config, LinkBase::File(path), &html));
    }

    let client = reqwest::blocking::Client::new();
    let response = client.get(location).send()?.error_for_status()?;
    // redirects may have moved us; resolve hrefs against where we ended up
    let base = response.url().clone();
    let html = response.text()?;
    Ok(extract_links(config, LinkBase::Url(&base), &html))
}

fn extract_links(config: &Config, base: LinkBase, html: &str) -> Vec<String> {
    let mut links = Vec::new();

    for caps in HREF_RE.captures_iter(html) {
        let raw = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        let href = raw.trim();
        if href.is_empty() {
            continue;
        }

        match &base {
            LinkBase::Url(url) => match url.join(href) {
                Ok(joined) => links.push(joined.to_string()),
                Err(_) => config.debug(&format!("skipping unresolvable href {:?}", href)),
            },
            LinkBase::File(path) => {
                if Url::parse(href).is_ok() {
                    // already absolute, keep as-is
                    links.push(href.to_string());
                } else {
                    let parent = path.parent().unwrap_or_else(|| Path::new(""));
                    links.push(parent.join(href).to_string_lossy().into_owned());
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn lists_directory_children_sorted_as_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("v1")).unwrap();
        File::create(dir.path().join("v2.tar.gz")).unwrap();

        let links = list_links(&test_config(), &dir.path().to_string_lossy()).unwrap();

        let expected = vec![
            dir.path().join("v1").to_string_lossy().into_owned(),
            dir.path().join("v2.tar.gz").to_string_lossy().into_owned(),
        ];
        assert_eq!(expected, links);
    }

    #[test]
    fn reads_links_from_a_local_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("index.html");
        let mut file = File::create(&index).unwrap();
        write!(
            file,
            concat!(
                "<html><body>\n",
                "<a href=\"v3.zip\">v3.zip</a>\n",
                "<a href='v4/'>v4</a>\n",
                "<a href=v5/>v5</a>\n",
                "<a href=\"https://nodejs.org/dist/latest-v4.x/node-v4.8.3.tar.gz\">latest</a>\n",
                "<a href=\"   \">blank</a>\n",
                "<a name=\"anchor\">no href</a>\n",
                "<b href=\"nope\">not an anchor</b>\n",
                "</body></html>\n",
            )
        )
        .unwrap();

        let links = list_links(&test_config(), &index.to_string_lossy()).unwrap();

        let expected = vec![
            dir.path().join("v3.zip").to_string_lossy().into_owned(),
            dir.path().join("v4/").to_string_lossy().into_owned(),
            dir.path().join("v5/").to_string_lossy().into_owned(),
            "https://nodejs.org/dist/latest-v4.x/node-v4.8.3.tar.gz".to_string(),
        ];
        assert_eq!(expected, links);
    }

    #[test]
    fn a_package_has_no_links() {
        let err = list_links(&test_config(), "v6.xz").unwrap_err();
        assert!(matches!(err, Error::NotAnIndex(_)), "got {:?}", err);
    }

    #[test]
    fn url_hrefs_resolve_against_the_base() {
        let base = Url::parse("https://nodejs.org/dist/v8.1.2/").unwrap();
        let html = concat!(
            "<a href=\"node-v8.1.2-linux-x64.tar.gz\">pkg</a>",
            "<a href=\"../v8.1.1/\">previous</a>",
            "<a href=\"/download/\">top</a>",
        );

        let links = extract_links(&test_config(), LinkBase::Url(&base), html);

        assert_eq!(
            vec![
                "https://nodejs.org/dist/v8.1.2/node-v8.1.2-linux-x64.tar.gz".to_string(),
                "https://nodejs.org/dist/v8.1.1/".to_string(),
                "https://nodejs.org/download/".to_string(),
            ],
            links
        );
    }
}
