use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Quality summary of the final clustering.
///
/// Serializes to the metrics document consumed by downstream tooling:
/// `n_clusters`, `silhouette`, `calinski_harabasz`, `inertia`,
/// `cluster_sizes` (label → pixel count) and an ISO-8601 UTC `timestamp`.
///
/// `n_clusters` counts the distinct non-negative labels actually present on
/// the label raster, which can fall below the requested cluster count if a
/// cluster ends up empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterMetrics {
	pub n_clusters: usize,
	pub silhouette: f64,
	pub calinski_harabasz: f64,
	pub inertia: f64,
	pub cluster_sizes: BTreeMap<i32, usize>,
	pub timestamp: String,
}

impl ClusterMetrics {
	/// Current UTC time as an RFC 3339 / ISO-8601 string.
	#[must_use]
	pub fn utc_timestamp() -> String {
		OffsetDateTime::now_utc()
			.format(&Rfc3339)
			.expect("UTC timestamps format as RFC 3339")
	}
}
