use std::cell::Cell;
use std::future::Future;
use std::pin::pin;

use futures::future::{self, Either, LocalBoxFuture};
use futures::stream::{self, StreamExt};

use crate::error::ProbeFailure;
use crate::vocabulary::Candidate;

pub const DEFAULT_MAX_IN_FLIGHT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    Loaded,
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_loaded(self) -> bool {
        matches!(self, ProbeOutcome::Loaded)
    }
}

/// Tries to load one URL as an image. Implementations must settle exactly once.
pub trait ImageProber {
    fn probe(&self, url: &str) -> LocalBoxFuture<'static, ProbeOutcome>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub issued: usize,
    pub loaded: usize,
    pub missing: usize,
    pub timed_out: usize,
}

impl ProbeReport {
    pub fn record(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Loaded => self.loaded += 1,
            ProbeOutcome::Failed(ProbeFailure::Missing) => self.missing += 1,
            ProbeOutcome::Failed(ProbeFailure::TimedOut) => self.timed_out += 1,
        }
    }

    pub fn settled(&self) -> usize {
        self.loaded + self.missing + self.timed_out
    }
}

/// Races `probe` against `deadline`; the deadline winning counts as a failure.
pub async fn with_deadline<P, D>(probe: P, deadline: D) -> ProbeOutcome
where
    P: Future<Output = ProbeOutcome>,
    D: Future<Output = ()>,
{
    let probe = pin!(probe);
    let deadline = pin!(deadline);
    match future::select(probe, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => ProbeOutcome::Failed(ProbeFailure::TimedOut),
    }
}

/// Probes every candidate with at most `max_in_flight` outstanding, calling
/// `on_settled` as each one finishes. Returns once all of them have settled.
pub async fn run_probes<P, F>(
    prober: &P,
    candidates: Vec<Candidate>,
    max_in_flight: usize,
    mut on_settled: F,
) -> ProbeReport
where
    P: ImageProber + ?Sized,
    F: FnMut(Candidate, ProbeOutcome),
{
    let issued = Cell::new(0usize);
    let mut settled = stream::iter(candidates)
        .map(|candidate| {
            issued.set(issued.get() + 1);
            let pending = prober.probe(&candidate.path);
            async move { (candidate, pending.await) }
        })
        .buffer_unordered(max_in_flight.max(1));

    let mut report = ProbeReport::default();
    while let Some((candidate, outcome)) = settled.next().await {
        report.record(outcome);
        on_settled(candidate, outcome);
    }
    report.issued = issued.get();
    report
}
