use url::Url;

use crate::error::GalleryError;

pub const PAGES_HOST_SUFFIX: &str = ".github.io";
pub const PLACEHOLDER_USERNAME: &str = "username";
pub const PLACEHOLDER_REPO_NAME: &str = "repository";

/// Owner and repository the page is served for. Fixed for the page's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoContext {
    pub username: String,
    /// `None` for user and organization sites served from the host root.
    pub repo_name: Option<String>,
}

impl RepoContext {
    pub fn new(username: impl Into<String>, repo_name: Option<&str>) -> Self {
        let repo_name = repo_name
            .map(|name| name.trim().trim_matches('/').to_string())
            .filter(|name| !name.is_empty());
        Self {
            username: username.into(),
            repo_name,
        }
    }

    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_USERNAME, Some(PLACEHOLDER_REPO_NAME))
    }

    /// Reads `<user>.github.io/<repo>/...`. A first path segment that names an
    /// html file means the page sits at the root of a user site.
    pub fn infer(hostname: &str, pathname: &str) -> Result<Self, GalleryError> {
        let host = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
        let username = host
            .strip_suffix(PAGES_HOST_SUFFIX)
            .filter(|user| !user.is_empty() && !user.contains('.'))
            .ok_or_else(|| GalleryError::ContextInference {
                hostname: hostname.to_string(),
            })?;
        let repo_name = pathname
            .split('/')
            .find(|segment| !segment.is_empty())
            .filter(|segment| !is_html_file(segment));
        Ok(Self::new(username, repo_name))
    }

    /// Like [`RepoContext::infer`], but recovers with placeholder values. The
    /// error is handed back so the caller can log it.
    pub fn infer_or_placeholder(hostname: &str, pathname: &str) -> (Self, Option<GalleryError>) {
        match Self::infer(hostname, pathname) {
            Ok(context) => (context, None),
            Err(err) => (Self::placeholder(), Some(err)),
        }
    }

    pub fn base_url(&self) -> String {
        match self.repo_name.as_deref() {
            Some(repo) => format!("https://{}{PAGES_HOST_SUFFIX}/{repo}/", self.username),
            None => format!("https://{}{PAGES_HOST_SUFFIX}/", self.username),
        }
    }

    /// Absolute URL handed out for an image path. Absolute inputs pass through.
    pub fn resolve_image_url(&self, path: &str) -> String {
        let path = path.trim();
        if is_absolute_url(path) {
            return path.to_string();
        }
        let mut relative = path;
        loop {
            if let Some(rest) = relative.strip_prefix("./") {
                relative = rest;
            } else if let Some(rest) = relative.strip_prefix('/') {
                relative = rest;
            } else {
                break;
            }
        }
        let mut url = self.base_url();
        url.push_str(relative);
        collapse_separators(&url)
    }
}

pub fn is_absolute_url(path: &str) -> bool {
    Url::parse(path).is_ok()
}

fn is_html_file(segment: &str) -> bool {
    let lower = segment.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

/// Collapses repeated `/` in the path, between the `scheme://` marker and the
/// first `?` or `#`. Query and fragment are copied as is.
fn collapse_separators(url: &str) -> String {
    let (head, rest) = match url.find("://") {
        Some(idx) => url.split_at(idx + 3),
        None => ("", url),
    };
    let (path, tail) = rest.split_at(rest.find(['?', '#']).unwrap_or(rest.len()));
    let mut out = String::with_capacity(url.len());
    out.push_str(head);
    let mut previous_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        out.push(ch);
    }
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_keeps_scheme_marker() {
        assert_eq!(
            collapse_separators("https://a.github.io//site///x.png"),
            "https://a.github.io/site/x.png"
        );
    }

    #[test]
    fn collapse_stops_at_query_and_fragment() {
        assert_eq!(
            collapse_separators("https://a.github.io//x.png?src=https://b.c//d#e//f"),
            "https://a.github.io/x.png?src=https://b.c//d#e//f"
        );
    }

    #[test]
    fn html_segments_are_not_repositories() {
        assert!(is_html_file("index.html"));
        assert!(is_html_file("About.HTM"));
        assert!(!is_html_file("site"));
    }
}
