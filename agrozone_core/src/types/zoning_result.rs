use super::{ClusterMetrics, IndexStat, SamplePoint, Zone};
use serde::{Deserialize, Serialize};

/// One row of the per-zone statistics table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
	pub zone_id: usize,
	/// Per-index statistics in index insertion order.
	pub stats: Vec<(String, IndexStat)>,
}

/// Everything one zoning run produces.
///
/// Zones are ordered by `zone_id`; samples by `zone_id`, then selection
/// order within a zone. The CRS identifier is forwarded from the input
/// unchanged so collaborators can tag the vector layers they write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoningResult {
	pub zones: Vec<Zone>,
	pub samples: Vec<SamplePoint>,
	pub metrics: ClusterMetrics,
	pub zone_stats: Vec<ZoneStats>,
	pub crs: String,
}
