use crate::gallery::{Tile, TileStatus};
use crate::repo::RepoContext;

pub const COPY_LABEL: &str = "Copy URL";
pub const COPIED_LABEL: &str = "Copied!";
pub const MANUAL_COPY_LABEL: &str = "Press Ctrl+C to copy";
pub const COPY_FEEDBACK_MS: u32 = 1500;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    pub open: bool,
    pub url: String,
    pub preview_src: String,
    pub caption: String,
}

impl ModalState {
    /// Opens for a tile whose image actually loaded. Anything else is ignored.
    pub fn open_for(&mut self, tile: &Tile, context: &RepoContext) -> bool {
        if tile.status != TileStatus::Loaded {
            return false;
        }
        self.open = true;
        self.url = context.resolve_image_url(&tile.image.path);
        self.preview_src = tile.image.path.clone();
        self.caption = tile.image.filename.clone();
        true
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyStatus {
    #[default]
    Idle,
    Copied,
    Failed,
}

/// Button feedback after a copy attempt. Each attempt bumps the generation;
/// a revert only applies to the generation it was scheduled for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    generation: u64,
    status: CopyStatus,
}

impl CopyFeedback {
    pub fn succeed(&mut self) -> u64 {
        self.bump(CopyStatus::Copied)
    }

    pub fn fail(&mut self) -> u64 {
        self.bump(CopyStatus::Failed)
    }

    fn bump(&mut self, status: CopyStatus) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.status = status;
        self.generation
    }

    pub fn revert(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.status == CopyStatus::Idle {
            return false;
        }
        self.status = CopyStatus::Idle;
        true
    }

    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.status = CopyStatus::Idle;
    }

    pub fn status(&self) -> CopyStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn label(&self) -> &'static str {
        match self.status {
            CopyStatus::Idle => COPY_LABEL,
            CopyStatus::Copied => COPIED_LABEL,
            CopyStatus::Failed => MANUAL_COPY_LABEL,
        }
    }

    pub fn highlighted(&self) -> bool {
        self.status == CopyStatus::Copied
    }
}
