//! AgroZone pipeline engine.
//!
//! Turns a stack of spectral index rasters plus a field polygon into
//! management zones, sampling points and per-zone statistics:
//!
//! 1. mask — valid pixels (inside the field, all indices finite)
//! 2. features — imputed, standardized (optionally PCA-reduced) matrix
//! 3. cluster — cluster-count selection and seeded k-means
//! 4. polygonize — dissolved per-label geometries in world coordinates
//! 5. zones — geometric attributes and the minimum-size filter
//! 6. sample — farthest-point sampling inside each zone
//! 7. stats — per-zone, per-index mean and standard deviation
//!
//! The stages run strictly in sequence inside [`run`]; any failure aborts
//! the run with one of the typed `agrozone_core::ZoningError` kinds.

mod cluster;
mod features;
mod mask;
mod polygonize;
mod run;
mod sample;
mod stats;
mod zones;

pub use agrozone_core::{
	CancelToken, ClusterMetrics, IndexStack, IndexStat, RasterGeoref, Result, SamplePoint, ValidMask, Zone,
	ZoneStats, ZoningConfig, ZoningError, ZoningResult,
};
pub use run::{run, run_cancellable};
