//! Per-zone spectral statistics.

use agrozone_core::{ClusterAssignment, IndexStack, IndexStat, Zone, ZoneStats};

/// Mean and population standard deviation of the finite values.
fn summarize(values: impl Iterator<Item = f64>) -> IndexStat {
	let finite: Vec<f64> = values.filter(|v| v.is_finite()).collect();
	if finite.is_empty() {
		return IndexStat {
			mean: f64::NAN,
			std_dev: f64::NAN,
		};
	}
	let n = finite.len() as f64;
	let mean = finite.iter().sum::<f64>() / n;
	let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
	IndexStat {
		mean,
		std_dev: variance.sqrt(),
	}
}

/// Attaches per-index statistics to every zone and returns the statistics
/// table in `zone_id` order.
///
/// Statistics aggregate the pixels whose assignment carries the zone's
/// original cluster label, skipping non-finite values.
pub fn compute_zone_stats(
	zones: &mut [Zone],
	assignment: &ClusterAssignment,
	indices: &IndexStack,
) -> Vec<ZoneStats> {
	for zone in zones.iter_mut() {
		let pixels = assignment.pixels_with_label(zone.cluster_label);
		zone.index_stats = indices
			.iter()
			.map(|(name, raster)| {
				let stat = summarize(pixels.iter().map(|&(row, col)| raster[[row, col]]));
				(name.to_string(), stat)
			})
			.collect();
	}

	zones
		.iter()
		.map(|zone| ZoneStats {
			zone_id: zone.zone_id,
			stats: zone.index_stats.clone(),
		})
		.collect()
}
