//! Core data model for the AgroZone management-zone pipeline.
//!
//! This crate holds everything the pipeline crate and its collaborators share:
//! - `types`: georeferencing, the spectral index stack, masks, cluster labels
//!   and the result records (zones, sample points, metrics, statistics).
//! - `config`: run configuration with defaults and validation.
//! - `error`: the typed error enum every pipeline failure maps to.
//! - `cancel`: a cooperative cancellation token.
//! - `utils`: serialization helpers (the per-zone CSV table).
//!
//! The crate performs no I/O; reading rasters and writing vector layers is
//! the job of the callers that embed the pipeline.

mod cancel;
mod config;
mod error;
pub mod types;
pub mod utils;

pub use cancel::CancelToken;
pub use config::ZoningConfig;
pub use error::{Result, ZoningError};
pub use types::{
	ClusterAssignment, ClusterMetrics, IndexStack, IndexStat, RasterGeoref, SamplePoint, ValidMask, Zone, ZoneStats,
	ZoningResult,
};
