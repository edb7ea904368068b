use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ZoningError>;

/// Errors surfaced by the zoning pipeline.
///
/// Every failure aborts the run immediately and carries enough context for
/// the caller to dispatch on; partial results are never returned. The core
/// neither retries nor logs errors on its own.
#[derive(Debug, Error)]
pub enum ZoningError {
	/// Input validation failed before the pipeline started.
	#[error("invalid input: {0}")]
	InvalidInput(String),

	/// The field polygon and the finiteness mask select no pixels at all.
	#[error("no valid pixels: the field polygon and index rasters select an empty mask")]
	NoValidPixels,

	/// The feature preparer could not form a usable matrix.
	#[error("degenerate feature matrix: {0}")]
	DegenerateFeature(String),

	/// `force_k` lies outside the admissible range.
	#[error("invalid cluster count: force_k = {force_k} is not in [2, {max_k}]")]
	InvalidClusterCount { force_k: usize, max_k: usize },

	/// Too few valid pixels to evaluate any cluster count.
	#[error("insufficient samples for clustering: {n} valid pixels")]
	InsufficientSamples { n: usize },

	/// No admissible cluster count produced at least two non-empty clusters.
	#[error("clustering failure: {0}")]
	ClusteringFailure(String),

	/// The polygonizer produced zero records.
	#[error("polygonization produced no zones")]
	NoZones,

	/// Every zone fell below the minimum size.
	#[error("all zones filtered: no zone reaches {min_zone_size_ha} ha")]
	AllZonesFiltered { min_zone_size_ha: f64 },

	/// The sampler emitted zero points.
	#[error("no sample points emitted")]
	NoSamples,

	/// Cooperative cancellation was requested.
	#[error("run cancelled")]
	Cancelled,
}
