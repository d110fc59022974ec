use pages_gallery_core::{
    merge_candidates, Candidate, CandidateSource, GalleryError, GalleryState, ProbeFailure,
    ProbeOutcome, RepoContext, ScanEvent, ScanPhase, TileStatus,
};

const MISSING: ProbeOutcome = ProbeOutcome::Failed(ProbeFailure::Missing);

fn context() -> RepoContext {
    RepoContext::new("alice", Some("site"))
}

#[test]
fn nothing_found_ends_empty_exactly_once() {
    let mut state = GalleryState::new(context());
    let scan = state.begin_scan(2);
    assert_eq!(state.record(scan, &Candidate::guessed("a.png"), MISSING), ScanEvent::Missed);
    assert_eq!(state.record(scan, &Candidate::guessed("b.png"), MISSING), ScanEvent::Missed);

    assert_eq!(
        state.finish(scan),
        Some(Err(GalleryError::DiscoveryExhausted { probed: 2 }))
    );
    assert_eq!(state.phase(), ScanPhase::Empty);
    assert_eq!(state.finish(scan), None);
    assert_eq!(state.phase(), ScanPhase::Empty);
}

#[test]
fn completion_counter_never_exceeds_total() {
    let mut state = GalleryState::new(context());
    let scan = state.begin_scan(1);
    state.record(scan, &Candidate::guessed("a.png"), MISSING);
    assert_eq!(
        state.record(scan, &Candidate::guessed("b.png"), MISSING),
        ScanEvent::Stale
    );
    assert_eq!(
        state.phase(),
        ScanPhase::Scanning {
            completed: 1,
            total: 1
        }
    );
    assert_eq!(state.report().settled(), 1);
}

#[test]
fn loaded_probes_append_tiles_in_arrival_order() {
    let mut state = GalleryState::new(context());
    let scan = state.begin_scan(3);
    assert_eq!(
        state.record(scan, &Candidate::guessed("image.2.png"), ProbeOutcome::Loaded),
        ScanEvent::Appended(0)
    );
    state.record(scan, &Candidate::guessed("image.3.png"), MISSING);
    assert_eq!(
        state.record(scan, &Candidate::guessed("image.1.png"), ProbeOutcome::Loaded),
        ScanEvent::Appended(1)
    );
    assert_eq!(state.finish(scan), Some(Ok(2)));
    assert_eq!(state.phase(), ScanPhase::Ready);

    let names: Vec<&str> = state
        .tiles()
        .iter()
        .map(|tile| tile.image.filename.as_str())
        .collect();
    assert_eq!(names, vec!["image.2.png", "image.1.png"]);
    assert!(state.tiles().iter().all(|tile| tile.status == TileStatus::Loading));
}

#[test]
fn same_resolved_path_renders_one_tile() {
    let mut state = GalleryState::new(context());
    let scan = state.begin_scan(3);
    state.record(scan, &Candidate::guessed("image.logo.png"), ProbeOutcome::Loaded);
    assert_eq!(
        state.record(scan, &Candidate::scraped("./image.logo.png"), ProbeOutcome::Loaded),
        ScanEvent::Duplicate
    );
    assert_eq!(
        state.record(
            scan,
            &Candidate::scraped("https://alice.github.io/site/image.logo.png"),
            ProbeOutcome::Loaded
        ),
        ScanEvent::Duplicate
    );
    assert_eq!(state.tiles().len(), 1);
    assert!(state.is_resolved("/image.logo.png"));
}

#[test]
fn rescan_clears_previous_results() {
    let mut state = GalleryState::new(context());
    let first = state.begin_scan(1);
    state.record(first, &Candidate::guessed("a.png"), ProbeOutcome::Loaded);
    state.finish(first);
    assert_eq!(state.tiles().len(), 1);

    let second = state.begin_scan(1);
    assert_ne!(first, second);
    assert!(state.tiles().is_empty());
    assert!(!state.is_resolved("a.png"));

    assert_eq!(
        state.record(first, &Candidate::guessed("late.png"), ProbeOutcome::Loaded),
        ScanEvent::Stale
    );
    assert_eq!(state.finish(first), None);

    state.record(second, &Candidate::guessed("a.png"), MISSING);
    assert_eq!(
        state.finish(second),
        Some(Err(GalleryError::DiscoveryExhausted { probed: 1 }))
    );
}

#[test]
fn tile_status_follows_image_events() {
    let mut state = GalleryState::new(context());
    let scan = state.begin_scan(1);
    state.record(scan, &Candidate::guessed("a.png"), ProbeOutcome::Loaded);
    assert!(state.set_tile_status(0, TileStatus::Failed));
    assert!(!state.set_tile_status(0, TileStatus::Failed));
    assert!(!state.set_tile_status(7, TileStatus::Loaded));
    assert_eq!(state.tile(0).map(|tile| tile.status), Some(TileStatus::Failed));
}

#[test]
fn merge_skips_paths_that_resolve_to_known_candidates() {
    let context = context();
    let mut candidates = vec![
        Candidate::guessed("image.logo.png"),
        Candidate::guessed("image.1.png"),
    ];
    let added = merge_candidates(
        &context,
        &mut candidates,
        vec![
            Candidate::scraped("image.logo.png"),
            Candidate::scraped("photos/holiday.jpg"),
            Candidate::scraped("photos//holiday.jpg"),
            Candidate::scraped("https://cdn.example.com/x.png"),
        ],
    );
    assert_eq!(added, 2);
    let paths: Vec<&str> = candidates.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "image.logo.png",
            "image.1.png",
            "photos/holiday.jpg",
            "https://cdn.example.com/x.png",
        ]
    );
}

#[test]
fn extend_scan_only_touches_the_current_scan() {
    let mut state = GalleryState::new(context());
    let stale = state.begin_scan(2);
    let scan = state.begin_scan(2);
    assert!(!state.extend_scan(stale, 5));
    assert!(state.extend_scan(scan, 1));
    assert_eq!(
        state.phase(),
        ScanPhase::Scanning {
            completed: 0,
            total: 3
        }
    );
    assert_eq!(state.report().issued, 3);

    for path in ["a.png", "b.png", "c.png"] {
        state.record(scan, &Candidate::guessed(path), MISSING);
    }
    assert_eq!(
        state.finish(scan),
        Some(Err(GalleryError::DiscoveryExhausted { probed: 3 }))
    );
    assert!(!state.extend_scan(scan, 1));
}

#[test]
fn merged_candidates_remember_where_they_came_from() {
    let mut candidates = vec![Candidate::guessed("image.logo.png")];
    merge_candidates(
        &context(),
        &mut candidates,
        vec![
            Candidate::scraped("./image.logo.png"),
            Candidate::scraped("holiday.jpg"),
        ],
    );
    let sources: Vec<CandidateSource> = candidates.iter().map(|c| c.source).collect();
    assert_eq!(
        sources,
        vec![CandidateSource::Vocabulary, CandidateSource::Listing]
    );
}
