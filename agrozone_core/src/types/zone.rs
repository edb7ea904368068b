use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// Per-index summary statistics attached to a zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexStat {
	pub mean: f64,
	pub std_dev: f64,
}

/// A management zone surviving the size filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
	/// Consecutive id assigned after filtering, `0..M-1`.
	pub zone_id: usize,
	/// Label this zone carries on the cluster assignment raster. The raster
	/// is not re-labeled after filtering, so downstream lookups translate
	/// through this field.
	pub cluster_label: i32,
	/// Dissolved footprint; disjoint parts of one cluster stay in one zone.
	pub geometry: MultiPolygon<f64>,
	pub area_ha: f64,
	pub perimeter_m: f64,
	/// `4π·area / perimeter²` — 1 for a circle, 0 when the perimeter is 0.
	pub compactness: f64,
	/// Per-index statistics in index insertion order.
	pub index_stats: Vec<(String, IndexStat)>,
}
