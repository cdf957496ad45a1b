use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use futures::future::{FutureExt, LocalBoxFuture, Shared, join_all};

use crate::foundation::core::{DatasetKind, Year};
use crate::foundation::error::{GeoError, GeoResult};
use crate::store::frame::RasterFrame;
use crate::store::loader::RasterLoader;
use crate::store::notice::{Notice, NoticeSink, TracingNotices};

/// Cache key: dataset plus its normalized year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameKey {
    /// Dataset.
    pub kind: DatasetKind,
    /// Year snapped onto the dataset's available years.
    pub year: Year,
}

impl FrameKey {
    /// Build a key, snapping `year` to the nearest year `kind` actually has.
    pub fn new(kind: DatasetKind, year: Year) -> Self {
        Self {
            kind,
            year: kind.nearest_available_year(year),
        }
    }
}

type LoadOutcome = Result<Arc<RasterFrame>, String>;
type PendingLoad = Shared<LocalBoxFuture<'static, LoadOutcome>>;

enum Entry {
    Ready(Arc<RasterFrame>),
    Pending { ticket: u64, load: PendingLoad },
}

/// Result of [`FrameStore::preload`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadReport {
    /// Dataset that was preloaded.
    pub kind: DatasetKind,
    /// Years now cached.
    pub loaded: usize,
    /// Years whose load failed.
    pub failed: Vec<Year>,
}

/// Memoizing frame cache keyed by `(dataset, year)`.
///
/// Contract:
/// - a key is loaded at most once while a load is in flight; concurrent requests share it
/// - a successful frame is cached forever and served to every later request
/// - a failed load caches nothing and may be retried
/// - a failing key is reported to the notice sink once, until it loads successfully
///
/// The store is single-threaded: loads are polled by whichever caller awaits them.
pub struct FrameStore {
    loader: Rc<dyn RasterLoader>,
    notices: Rc<dyn NoticeSink>,
    entries: RefCell<HashMap<FrameKey, Entry>>,
    load_counts: RefCell<HashMap<FrameKey, u32>>,
    reported: RefCell<HashSet<FrameKey>>,
    next_ticket: Cell<u64>,
}

impl std::fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.borrow();
        let ready = entries
            .values()
            .filter(|e| matches!(e, Entry::Ready(_)))
            .count();
        f.debug_struct("FrameStore")
            .field("ready", &ready)
            .field("pending", &(entries.len() - ready))
            .finish()
    }
}

impl FrameStore {
    /// Store that reports load failures through `tracing` only.
    pub fn new(loader: Rc<dyn RasterLoader>) -> Self {
        Self::with_notices(loader, Rc::new(TracingNotices))
    }

    /// Store that reports load failures to `notices`.
    pub fn with_notices(loader: Rc<dyn RasterLoader>, notices: Rc<dyn NoticeSink>) -> Self {
        Self {
            loader,
            notices,
            entries: RefCell::new(HashMap::new()),
            load_counts: RefCell::new(HashMap::new()),
            reported: RefCell::new(HashSet::new()),
            next_ticket: Cell::new(0),
        }
    }

    /// Cached frame for `(kind, year)` without suspending or loading.
    pub fn peek(&self, kind: DatasetKind, year: Year) -> Option<Arc<RasterFrame>> {
        match self.entries.borrow().get(&FrameKey::new(kind, year)) {
            Some(Entry::Ready(frame)) => Some(Arc::clone(frame)),
            _ => None,
        }
    }

    /// `true` when a frame for `(kind, year)` is cached.
    pub fn is_cached(&self, kind: DatasetKind, year: Year) -> bool {
        self.peek(kind, year).is_some()
    }

    /// How many times the loader has been invoked for `(kind, year)`.
    pub fn load_count(&self, kind: DatasetKind, year: Year) -> u32 {
        self.load_counts
            .borrow()
            .get(&FrameKey::new(kind, year))
            .copied()
            .unwrap_or(0)
    }

    /// Return the cached frame or load it, joining an in-flight load for the same key.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_load(&self, kind: DatasetKind, year: Year) -> GeoResult<Arc<RasterFrame>> {
        let key = FrameKey::new(kind, year);

        let (ticket, load) = {
            let mut entries = self.entries.borrow_mut();
            match entries.get(&key) {
                Some(Entry::Ready(frame)) => {
                    tracing::debug!(year = key.year, "frame cache hit");
                    return Ok(Arc::clone(frame));
                }
                Some(Entry::Pending { ticket, load }) => {
                    tracing::debug!(year = key.year, "joining in-flight load");
                    (*ticket, load.clone())
                }
                None => {
                    let ticket = self.next_ticket.get();
                    self.next_ticket.set(ticket + 1);
                    let load = self.start_load(key);
                    entries.insert(
                        key,
                        Entry::Pending {
                            ticket,
                            load: load.clone(),
                        },
                    );
                    (ticket, load)
                }
            }
        };

        let outcome = load.await;
        self.settle(key, ticket, &outcome);
        outcome.map_err(|reason| GeoError::load(key.kind, key.year, reason))
    }

    /// Load every available year of `kind` concurrently.
    #[tracing::instrument(skip(self))]
    pub async fn preload(&self, kind: DatasetKind) -> PreloadReport {
        let years = kind.available_years();
        let results = join_all(years.iter().map(|&y| self.get_or_load(kind, y))).await;
        let failed: Vec<Year> = years
            .iter()
            .zip(&results)
            .filter(|(_, r)| r.is_err())
            .map(|(&y, _)| y)
            .collect();
        let report = PreloadReport {
            kind,
            loaded: years.len() - failed.len(),
            failed,
        };
        tracing::debug!(loaded = report.loaded, failed = report.failed.len(), "preload done");
        report
    }

    fn start_load(&self, key: FrameKey) -> PendingLoad {
        *self.load_counts.borrow_mut().entry(key).or_insert(0) += 1;

        let loader = Rc::clone(&self.loader);
        async move {
            match loader.load_raster(key.year, key.kind).await {
                Ok(frame) if frame.is_usable() => Ok(Arc::new(frame.with_valid_range(key.kind))),
                Ok(frame) => Err(format!(
                    "loader returned an unusable frame ({} cells for {}x{})",
                    frame.cells.len(),
                    frame.width,
                    frame.height
                )),
                Err(err) => Err(format!("{err:#}")),
            }
        }
        .boxed_local()
        .shared()
    }

    /// Move the entry out of `Pending` once, no matter how many callers shared the load.
    fn settle(&self, key: FrameKey, ticket: u64, outcome: &LoadOutcome) {
        let mut entries = self.entries.borrow_mut();
        let ours = matches!(
            entries.get(&key),
            Some(Entry::Pending { ticket: t, .. }) if *t == ticket
        );
        if !ours {
            return;
        }

        match outcome {
            Ok(frame) => {
                entries.insert(key, Entry::Ready(Arc::clone(frame)));
                self.reported.borrow_mut().remove(&key);
            }
            Err(reason) => {
                entries.remove(&key);
                drop(entries);
                if !self.reported.borrow_mut().insert(key) {
                    tracing::debug!(kind = %key.kind, year = key.year, %reason, "frame load failed again");
                    return;
                }
                tracing::warn!(kind = %key.kind, year = key.year, %reason, "frame load failed");
                self.notices.notify(Notice {
                    kind: key.kind,
                    year: key.year,
                    message: format!("could not load {} for {}: {reason}", key.kind, key.year),
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/frame_store.rs"]
mod tests;
