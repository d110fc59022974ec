use std::collections::HashSet;

use crate::error::GalleryError;
use crate::probe::{ProbeOutcome, ProbeReport};
use crate::repo::RepoContext;
use crate::vocabulary::{file_name, Candidate};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredImage {
    pub filename: String,
    pub path: String,
}

impl DiscoveredImage {
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            filename: file_name(&path).to_string(),
            path,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileStatus {
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub image: DiscoveredImage,
    pub status: TileStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Scanning { completed: usize, total: usize },
    Ready,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanEvent {
    /// A new tile was appended at this index.
    Appended(usize),
    Duplicate,
    Missed,
    /// The outcome belongs to a scan that is no longer current.
    Stale,
}

/// Everything the loader has discovered for the current scan.
#[derive(Clone, Debug)]
pub struct GalleryState {
    context: RepoContext,
    tiles: Vec<Tile>,
    resolved: HashSet<String>,
    phase: ScanPhase,
    scan_id: u64,
    report: ProbeReport,
}

impl GalleryState {
    pub fn new(context: RepoContext) -> Self {
        Self {
            context,
            tiles: Vec::new(),
            resolved: HashSet::new(),
            phase: ScanPhase::Idle,
            scan_id: 0,
            report: ProbeReport::default(),
        }
    }

    pub fn context(&self) -> &RepoContext {
        &self.context
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn scan_id(&self) -> u64 {
        self.scan_id
    }

    pub fn report(&self) -> ProbeReport {
        self.report
    }

    /// Drops everything from the previous scan and opens a new one expecting
    /// `total` probe outcomes.
    pub fn begin_scan(&mut self, total: usize) -> u64 {
        self.scan_id = self.scan_id.wrapping_add(1);
        self.tiles.clear();
        self.resolved.clear();
        self.report = ProbeReport {
            issued: total,
            ..ProbeReport::default()
        };
        self.phase = ScanPhase::Scanning {
            completed: 0,
            total,
        };
        self.scan_id
    }

    /// Raises the expected outcome count before probing starts, e.g. after the
    /// listing scrape added candidates.
    pub fn extend_scan(&mut self, scan_id: u64, extra: usize) -> bool {
        if scan_id != self.scan_id {
            return false;
        }
        let ScanPhase::Scanning { completed, total } = self.phase else {
            return false;
        };
        self.phase = ScanPhase::Scanning {
            completed,
            total: total + extra,
        };
        self.report.issued += extra;
        true
    }

    pub fn record(
        &mut self,
        scan_id: u64,
        candidate: &Candidate,
        outcome: ProbeOutcome,
    ) -> ScanEvent {
        if scan_id != self.scan_id {
            return ScanEvent::Stale;
        }
        let ScanPhase::Scanning { completed, total } = self.phase else {
            return ScanEvent::Stale;
        };
        if completed >= total {
            return ScanEvent::Stale;
        }
        self.phase = ScanPhase::Scanning {
            completed: completed + 1,
            total,
        };
        self.report.record(outcome);
        if !outcome.is_loaded() {
            return ScanEvent::Missed;
        }
        let key = self.context.resolve_image_url(&candidate.path);
        if !self.resolved.insert(key) {
            return ScanEvent::Duplicate;
        }
        self.tiles.push(Tile {
            image: DiscoveredImage::from_path(candidate.path.clone()),
            status: TileStatus::Loading,
        });
        ScanEvent::Appended(self.tiles.len() - 1)
    }

    /// Closes the scan. Yields the tile count, or `DiscoveryExhausted` when
    /// nothing was found. Returns `None` for stale or already finished scans.
    pub fn finish(&mut self, scan_id: u64) -> Option<Result<usize, GalleryError>> {
        if scan_id != self.scan_id {
            return None;
        }
        let ScanPhase::Scanning { completed, .. } = self.phase else {
            return None;
        };
        if self.tiles.is_empty() {
            self.phase = ScanPhase::Empty;
            Some(Err(GalleryError::DiscoveryExhausted { probed: completed }))
        } else {
            self.phase = ScanPhase::Ready;
            Some(Ok(self.tiles.len()))
        }
    }

    pub fn set_tile_status(&mut self, index: usize, status: TileStatus) -> bool {
        match self.tiles.get_mut(index) {
            Some(tile) if tile.status != status => {
                tile.status = status;
                true
            }
            _ => false,
        }
    }

    pub fn is_resolved(&self, path: &str) -> bool {
        self.resolved.contains(&self.context.resolve_image_url(path))
    }
}

/// Appends `extra` to `candidates`, skipping anything that resolves to a URL
/// already present. Returns how many were added.
pub fn merge_candidates(
    context: &RepoContext,
    candidates: &mut Vec<Candidate>,
    extra: impl IntoIterator<Item = Candidate>,
) -> usize {
    let mut seen: HashSet<String> = candidates
        .iter()
        .map(|candidate| context.resolve_image_url(&candidate.path))
        .collect();
    let before = candidates.len();
    for candidate in extra {
        if seen.insert(context.resolve_image_url(&candidate.path)) {
            candidates.push(candidate);
        }
    }
    candidates.len() - before
}
