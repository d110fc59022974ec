use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::image_probe::HtmlImageProber;
use crate::listing_fetch;
use pages_gallery_core::{
    merge_candidates, run_probes, Candidate, CandidateSource, GalleryConfig, GalleryError,
    GalleryState, ScanEvent,
};

/// Drives one scan at a time against the shared gallery state. Outcomes from
/// a superseded scan are dropped by the state itself.
#[derive(Clone)]
pub(crate) struct ScanRuntime {
    state: Rc<RefCell<GalleryState>>,
    config: Rc<GalleryConfig>,
    on_change: Rc<dyn Fn()>,
}

impl ScanRuntime {
    pub(crate) fn new(
        state: Rc<RefCell<GalleryState>>,
        config: Rc<GalleryConfig>,
        on_change: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            state,
            config,
            on_change,
        }
    }

    pub(crate) fn start(&self) {
        let runtime = self.clone();
        spawn_local(async move {
            runtime.scan().await;
        });
    }

    async fn scan(&self) {
        let mut candidates = self.config.vocabulary.candidates();
        let scan_id = self.state.borrow_mut().begin_scan(candidates.len());
        (self.on_change)();

        if self.config.scrape_listing {
            self.merge_listing(scan_id, &mut candidates).await;
        }
        if self.state.borrow().scan_id() != scan_id {
            return;
        }

        gloo::console::log!(format!(
            "scan {scan_id}: probing {} candidates, {} at a time",
            candidates.len(),
            self.config.max_in_flight
        ));

        let report = run_probes(
            &HtmlImageProber::new(self.config.probe_timeout_ms),
            candidates,
            self.config.max_in_flight,
            |candidate, outcome| {
                let event = self.state.borrow_mut().record(scan_id, &candidate, outcome);
                match event {
                    ScanEvent::Stale => return,
                    ScanEvent::Missed => {
                        gloo::console::debug!(format!("probe miss: {}", candidate.path));
                    }
                    ScanEvent::Duplicate => {
                        gloo::console::debug!(format!("duplicate image: {}", candidate.path));
                    }
                    ScanEvent::Appended(_) if candidate.source == CandidateSource::Listing => {
                        gloo::console::log!(format!("found via listing: {}", candidate.path));
                    }
                    ScanEvent::Appended(_) => {}
                }
                (self.on_change)();
            },
        )
        .await;

        gloo::console::log!(format!(
            "scan {scan_id}: {} loaded, {} missing, {} timed out",
            report.loaded, report.missing, report.timed_out
        ));

        let finished = self.state.borrow_mut().finish(scan_id);
        match finished {
            Some(Ok(count)) => {
                gloo::console::log!(format!("scan {scan_id}: {count} images"));
            }
            Some(Err(err)) => {
                gloo::console::log!(format!("scan {scan_id}: {err}"));
            }
            None => return,
        }
        (self.on_change)();
    }

    async fn merge_listing(&self, scan_id: u64, candidates: &mut Vec<Candidate>) {
        match listing_fetch::scrape_page_directory(&self.config).await {
            Ok(paths) => {
                let context = self.state.borrow().context().clone();
                let added = merge_candidates(
                    &context,
                    candidates,
                    paths.into_iter().map(Candidate::scraped),
                );
                self.state.borrow_mut().extend_scan(scan_id, added);
                gloo::console::log!(format!("listing: {added} extra candidates"));
            }
            Err(err) => log_listing_error(&err),
        }
    }
}

fn log_listing_error(err: &GalleryError) {
    gloo::console::log!(format!("{err}; continuing with guessed names"));
}
