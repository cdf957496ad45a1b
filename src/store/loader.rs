use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::core::{DatasetKind, Year};
use crate::store::frame::RasterFrame;

/// Boundary to whatever decodes raster sources into cell arrays.
///
/// Implementations should return an error (or an empty-cells frame) on any decode problem rather
/// than stale data. Loads run on the caller's thread; futures need not be `Send`.
#[async_trait::async_trait(?Send)]
pub trait RasterLoader {
    /// Decode the frame for `kind` at `year`. Overlays are requested with year `0`.
    async fn load_raster(&self, year: Year, kind: DatasetKind) -> anyhow::Result<RasterFrame>;
}

/// Loads frames stored as JSON at `<root>/<dataset-slug>/<year>.json`.
#[derive(Clone, Debug)]
pub struct JsonDirLoader {
    root: PathBuf,
}

impl JsonDirLoader {
    /// Loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File a frame is read from.
    pub fn path_for(&self, year: Year, kind: DatasetKind) -> PathBuf {
        self.root.join(kind.slug()).join(format!("{year}.json"))
    }
}

#[async_trait::async_trait(?Send)]
impl RasterLoader for JsonDirLoader {
    async fn load_raster(&self, year: Year, kind: DatasetKind) -> anyhow::Result<RasterFrame> {
        let path = self.path_for(year, kind);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read raster '{}'", path.display()))?;
        let frame: RasterFrame = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse raster '{}'", path.display()))?;
        Ok(frame)
    }
}

/// In-memory loader over a fixed set of frames; unknown keys fail.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    frames: RefCell<HashMap<(DatasetKind, Year), RasterFrame>>,
    calls: Cell<u32>,
}

impl MemoryLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `frame` for `(kind, year)`, replacing any previous one.
    pub fn insert(&self, kind: DatasetKind, year: Year, frame: RasterFrame) {
        self.frames.borrow_mut().insert((kind, year), frame);
    }

    /// Builder form of [`MemoryLoader::insert`].
    pub fn with(self, kind: DatasetKind, year: Year, frame: RasterFrame) -> Self {
        self.insert(kind, year, frame);
        self
    }

    /// Number of `load_raster` calls served so far, failed ones included.
    pub fn calls(&self) -> u32 {
        self.calls.get()
    }
}

#[async_trait::async_trait(?Send)]
impl RasterLoader for MemoryLoader {
    async fn load_raster(&self, year: Year, kind: DatasetKind) -> anyhow::Result<RasterFrame> {
        self.calls.set(self.calls.get() + 1);
        self.frames
            .borrow()
            .get(&(kind, year))
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no frame for {kind} @ {year}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/loader.rs"]
mod tests;
