use web_sys::UrlSearchParams;

use pages_gallery_core::config::QUERY_KEYS;
use pages_gallery_core::{GalleryConfig, GalleryError, RepoContext};

#[derive(Clone, Debug, PartialEq)]
pub struct InitConfig {
    pub context: RepoContext,
    pub gallery: GalleryConfig,
}

impl InitConfig {
    pub fn new(context: RepoContext, gallery: GalleryConfig) -> Self {
        Self { context, gallery }
    }
}

/// Build-time defaults, then the page location, then query overrides.
pub fn load_init_config() -> InitConfig {
    let mut gallery = GalleryConfig::default();
    if let Some(prefix) = build_prefix() {
        if let Err(err) = gallery.apply_param("prefix", &prefix) {
            warn_config(&err);
        }
    }
    let Some(window) = web_sys::window() else {
        return InitConfig::new(RepoContext::placeholder(), gallery);
    };
    let location = window.location();
    let hostname = location.hostname().unwrap_or_default();
    let pathname = location.pathname().unwrap_or_default();
    let (context, err) = RepoContext::infer_or_placeholder(&hostname, &pathname);
    if let Some(err) = err {
        gloo::console::warn!(format!("{err}; using placeholder repository"));
    }

    let search = location.search().unwrap_or_default();
    for err in apply_query_overrides(&mut gallery, &search) {
        warn_config(&err);
    }
    InitConfig::new(context, gallery)
}

fn build_prefix() -> Option<String> {
    let raw = option_env!("PAGES_GALLERY_PREFIX")
        .or(option_env!("TRUNK_PUBLIC_PAGES_GALLERY_PREFIX"))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn apply_query_overrides(gallery: &mut GalleryConfig, search: &str) -> Vec<GalleryError> {
    let search = search.trim();
    if search.is_empty() {
        return Vec::new();
    }
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        return Vec::new();
    };
    let pairs: Vec<(&str, String)> = QUERY_KEYS
        .iter()
        .filter_map(|key| params.get(key).map(|value| (*key, value)))
        .collect();
    gallery.apply_params(pairs.iter().map(|(key, value)| (*key, value.as_str())))
}

fn warn_config(err: &GalleryError) {
    gloo::console::warn!(format!("{err}; keeping default"));
}
