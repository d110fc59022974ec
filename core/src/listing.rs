//! Best-effort scraping of a directory page for image links.
//!
//! Static hosts rarely serve a listing, so whatever this finds is only ever
//! added to the probe set; nothing here decides what exists.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::GalleryError;
use crate::vocabulary::Vocabulary;

// Constant pattern; `href_pattern_compiles` covers the expect.
fn href_pattern() -> &'static Regex {
    static HREF: OnceLock<Regex> = OnceLock::new();
    HREF.get_or_init(|| {
        Regex::new(r#"(?i)<a\s[^>]*?href\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+))"#)
            .expect("href pattern is valid")
    })
}

/// URL of the directory holding the page, with query and fragment dropped.
pub fn directory_url(page_href: &str) -> Result<Url, GalleryError> {
    let mut url = Url::parse(page_href).map_err(|err| GalleryError::Listing(err.to_string()))?;
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = url.path();
        let dir = match path.rfind('/') {
            Some(idx) => path[..=idx].to_string(),
            None => "/".to_string(),
        };
        url.set_path(&dir);
    }
    Ok(url)
}

/// Raw `href` values of every anchor in `html`, in document order.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    href_pattern()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

/// Image links found in `html`, as paths relative to `directory` when they
/// live under it and as absolute URLs otherwise. Deduplicated, in order.
pub fn scrape_image_paths(html: &str, directory: &Url, vocabulary: &Vocabulary) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for href in anchor_hrefs(html) {
        let Ok(mut resolved) = directory.join(&href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        resolved.set_fragment(None);
        if !vocabulary.has_image_extension(resolved.path()) {
            continue;
        }
        let path = match resolved.as_str().strip_prefix(directory.as_str()) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => resolved.to_string(),
        };
        if seen.insert(path.clone()) {
            out.push(path);
        }
    }
    out
}
