use std::collections::HashSet;

use crate::error::GalleryError;
use crate::modal::COPY_FEEDBACK_MS;
use crate::probe::DEFAULT_MAX_IN_FLIGHT;
use crate::vocabulary::{Vocabulary, MAX_CANDIDATES};

pub const DEFAULT_PROBE_TIMEOUT_MS: u32 = 8_000;
pub const DEFAULT_LISTING_TIMEOUT_MS: u32 = 3_000;
pub const MAX_NUMBER_LIMIT: u32 = 200;

/// Query parameters that override the build-time configuration.
pub const QUERY_KEYS: &[&str] = &[
    "prefix",
    "names",
    "max_number",
    "timeout_ms",
    "concurrency",
    "scrape",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryConfig {
    pub vocabulary: Vocabulary,
    pub probe_timeout_ms: u32,
    pub max_in_flight: usize,
    pub scrape_listing: bool,
    pub listing_timeout_ms: u32,
    pub copy_feedback_ms: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            scrape_listing: true,
            listing_timeout_ms: DEFAULT_LISTING_TIMEOUT_MS,
            copy_feedback_ms: COPY_FEEDBACK_MS,
        }
    }
}

impl GalleryConfig {
    /// Applies `(key, value)` overrides in order. Bad values leave the current
    /// setting alone and are returned so the caller can report them.
    pub fn apply_params<'a, I>(&mut self, params: I) -> Vec<GalleryError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        params
            .into_iter()
            .filter_map(|(key, value)| self.apply_param(key, value).err())
            .collect()
    }

    pub fn apply_param(&mut self, key: &str, value: &str) -> Result<(), GalleryError> {
        let raw = value.trim();
        let invalid = || GalleryError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "prefix" => {
                if raw.contains('/') {
                    return Err(invalid());
                }
                self.vocabulary.prefix = raw.to_string();
            }
            "names" => {
                let mut seen = HashSet::new();
                let names: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty() && seen.insert(*name))
                    .map(str::to_string)
                    .collect();
                if names.iter().any(|name| name.contains('/')) {
                    return Err(invalid());
                }
                let vocabulary = Vocabulary {
                    basenames: names,
                    ..self.vocabulary.clone()
                };
                self.vocabulary = within_limit(vocabulary).ok_or_else(invalid)?;
            }
            "max_number" => {
                let end = raw.parse::<u32>().map_err(|_| invalid())?;
                if end > MAX_NUMBER_LIMIT {
                    return Err(invalid());
                }
                let vocabulary = Vocabulary {
                    numbers: *self.vocabulary.numbers.start()..=end,
                    ..self.vocabulary.clone()
                };
                self.vocabulary = within_limit(vocabulary).ok_or_else(invalid)?;
            }
            "timeout_ms" => {
                let ms = raw.parse::<u32>().map_err(|_| invalid())?;
                self.probe_timeout_ms = ms.max(1);
            }
            "concurrency" => {
                let limit = raw.parse::<usize>().map_err(|_| invalid())?;
                self.max_in_flight = limit.max(1);
            }
            "scrape" => {
                self.scrape_listing = parse_flag(raw).ok_or_else(invalid)?;
            }
            _ => {}
        }
        Ok(())
    }
}

fn within_limit(vocabulary: Vocabulary) -> Option<Vocabulary> {
    (vocabulary.len() <= MAX_CANDIDATES).then_some(vocabulary)
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
