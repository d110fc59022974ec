use pages_gallery_core::modal::{COPIED_LABEL, COPY_LABEL, MANUAL_COPY_LABEL};
use pages_gallery_core::{
    CopyFeedback, CopyStatus, DiscoveredImage, ModalState, RepoContext, Tile, TileStatus,
};

fn tile(path: &str, status: TileStatus) -> Tile {
    Tile {
        image: DiscoveredImage::from_path(path),
        status,
    }
}

#[test]
fn failed_or_loading_tiles_do_not_open() {
    let context = RepoContext::new("alice", Some("site"));
    let mut modal = ModalState::default();
    assert!(!modal.open_for(&tile("image.png", TileStatus::Failed), &context));
    assert!(!modal.open_for(&tile("image.png", TileStatus::Loading), &context));
    assert!(!modal.open);
    assert!(modal.url.is_empty());
}

#[test]
fn loaded_tile_opens_with_resolved_url() {
    let context = RepoContext::new("alice", Some("site"));
    let mut modal = ModalState::default();
    assert!(modal.open_for(&tile("image.png", TileStatus::Loaded), &context));
    assert!(modal.open);
    assert_eq!(modal.url, "https://alice.github.io/site/image.png");
    assert_eq!(modal.preview_src, "image.png");
    assert_eq!(modal.caption, "image.png");

    modal.close();
    assert!(!modal.open);
}

#[test]
fn repeated_copies_only_revert_on_latest_generation() {
    let mut feedback = CopyFeedback::default();
    assert_eq!(feedback.label(), COPY_LABEL);

    let first = feedback.succeed();
    let second = feedback.succeed();
    let third = feedback.succeed();
    assert_eq!(feedback.label(), COPIED_LABEL);
    assert!(feedback.highlighted());

    assert!(!feedback.revert(first));
    assert!(!feedback.revert(second));
    assert_eq!(feedback.label(), COPIED_LABEL);

    assert!(feedback.revert(third));
    assert_eq!(feedback.label(), COPY_LABEL);
    assert!(!feedback.highlighted());
    assert!(!feedback.revert(third));
}

#[test]
fn failed_copy_asks_for_manual_copy_and_reverts() {
    let mut feedback = CopyFeedback::default();
    let generation = feedback.fail();
    assert_eq!(feedback.status(), CopyStatus::Failed);
    assert_eq!(feedback.label(), MANUAL_COPY_LABEL);
    assert!(!feedback.highlighted());
    assert!(feedback.revert(generation));
    assert_eq!(feedback.label(), COPY_LABEL);
}

#[test]
fn reset_invalidates_pending_revert() {
    let mut feedback = CopyFeedback::default();
    let generation = feedback.succeed();
    feedback.reset();
    assert_eq!(feedback.status(), CopyStatus::Idle);
    assert!(!feedback.revert(generation));
    assert_ne!(feedback.generation(), generation);
}
