use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::api::FsSource;
use crate::error::FsError;
use crate::store::LoadRequest;
use crate::types::FsResponse;

/// Outcome of one background fetch, delivered to the UI thread
#[derive(Debug)]
pub struct LoadResult {
    pub path: String,
    pub outcome: Result<FsResponse, FsError>,
}

/// Runs directory fetches on background threads.
///
/// Fire-and-forget: no cancellation, no timeout beyond the source's own, and
/// results arrive in completion order. After [`Loader::shutdown`] finished
/// fetches are discarded instead of delivered.
pub struct Loader {
    source: Arc<dyn FsSource>,
    tx: Sender<LoadResult>,
    alive: Arc<AtomicBool>,
    in_flight: Arc<AtomicUsize>,
}

impl Loader {
    pub fn new(source: Arc<dyn FsSource>) -> (Self, Receiver<LoadResult>) {
        let (tx, rx) = mpsc::channel();
        let loader = Self {
            source,
            tx,
            alive: Arc::new(AtomicBool::new(true)),
            in_flight: Arc::new(AtomicUsize::new(0)),
        };
        (loader, rx)
    }

    pub fn spawn(&self, request: LoadRequest) {
        if !self.is_alive() {
            tracing::debug!(path = %request.path, "loader shut down, request ignored");
            return;
        }
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let alive = Arc::clone(&self.alive);
        let guard = InFlight::enter(&self.in_flight);

        thread::spawn(move || {
            let _guard = guard;
            let outcome = source.list(&request.path);
            if alive.load(Ordering::Acquire) {
                let _ = tx.send(LoadResult { path: request.path, outcome });
            } else {
                tracing::debug!(path = %request.path, "fetch finished after shutdown, result dropped");
            }
        });
    }

    /// Number of fetches that have not finished yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Stop delivering results. Requests already on the wire run to completion and are dropped.
    pub fn shutdown(&self) {
        if self.alive.swap(false, Ordering::AcqRel) {
            tracing::debug!(pending = self.in_flight(), "loader shut down");
        }
    }
}

/// Counts one running fetch; released when the worker ends, even by panic.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.shutdown();
    }
}
