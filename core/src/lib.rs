pub mod config;
pub mod error;
pub mod gallery;
pub mod listing;
pub mod modal;
pub mod probe;
pub mod repo;
pub mod vocabulary;

pub use config::GalleryConfig;
pub use error::{GalleryError, ProbeFailure};
pub use gallery::{
    merge_candidates, DiscoveredImage, GalleryState, ScanEvent, ScanPhase, Tile, TileStatus,
};
pub use modal::{CopyFeedback, CopyStatus, ModalState};
pub use probe::{run_probes, with_deadline, ImageProber, ProbeOutcome, ProbeReport};
pub use repo::RepoContext;
pub use vocabulary::{Candidate, CandidateSource, Vocabulary};
