use std::fmt;

/// Why a single candidate did not turn into a discovered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeFailure {
    /// The image fired an error event: missing resource or undecodable bytes.
    Missing,
    /// Neither load nor error fired before the probe deadline.
    TimedOut,
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::Missing => f.write_str("not found or not an image"),
            ProbeFailure::TimedOut => f.write_str("timed out"),
        }
    }
}

impl std::error::Error for ProbeFailure {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GalleryError {
    #[error("no images found after {probed} probes")]
    DiscoveryExhausted { probed: usize },
    #[error("hostname '{hostname}' is not a GitHub Pages host")]
    ContextInference { hostname: String },
    #[error("directory listing unavailable: {0}")]
    Listing(String),
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
    #[error("invalid value '{value}' for '{key}'")]
    InvalidConfig { key: String, value: String },
}
