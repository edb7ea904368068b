//! Spatially-dispersed sampling inside zones.

use agrozone_core::{ClusterAssignment, IndexStack, RasterGeoref, Result, SamplePoint, Zone, ZoningError};
use geo::Point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Splitmix increment decorrelating the per-zone sampling streams.
const ZONE_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Reproducible generator for one zone, a pure function of `(seed, zone_id)`
/// so zones sample independently of processing order.
fn zone_rng(seed: u64, zone_id: usize) -> SmallRng {
	SmallRng::seed_from_u64(seed ^ (zone_id as u64).wrapping_mul(ZONE_SEED_MIX))
}

/// Places sampling points in every zone.
///
/// Candidates are the centers of the pixels carrying the zone's original
/// cluster label, in scan order. Each zone receives
/// `max(points_per_zone, ⌊√|P|⌋)` points; when that reaches the candidate
/// count, all candidates are emitted in scan order, otherwise a
/// farthest-point selection spreads the points across the zone. Every point
/// carries the index values of its hosting pixel.
///
/// Output is ordered by `zone_id`, then selection order within the zone.
///
/// # Errors
/// Returns [`ZoningError::NoSamples`] when no point was emitted at all.
pub fn sample_zones(
	zones: &[Zone],
	assignment: &ClusterAssignment,
	indices: &IndexStack,
	georef: &RasterGeoref,
	points_per_zone: usize,
	seed: u64,
) -> Result<Vec<SamplePoint>> {
	let mut samples = Vec::new();

	for zone in zones {
		let pixels = assignment.pixels_with_label(zone.cluster_label);
		if pixels.is_empty() {
			continue;
		}
		let centers: Vec<(f64, f64)> = pixels.iter().map(|&(row, col)| georef.pixel_center(row, col)).collect();

		let n_target = points_per_zone.max((pixels.len() as f64).sqrt().floor() as usize);
		let chosen: Vec<usize> = if n_target >= pixels.len() {
			(0..pixels.len()).collect()
		} else {
			farthest_point_selection(&centers, n_target, &mut zone_rng(seed, zone.zone_id))
		};
		log::debug!("zone {}: {} of {} candidate pixels sampled", zone.zone_id, chosen.len(), pixels.len());

		for &candidate in &chosen {
			let (row, col) = pixels[candidate];
			let (x, y) = centers[candidate];
			let values = indices
				.iter()
				.map(|(name, raster)| (name.to_string(), raster[[row, col]]))
				.collect();
			samples.push(SamplePoint {
				point: Point::new(x, y),
				zone_id: zone.zone_id,
				values,
			});
		}
	}

	if samples.is_empty() {
		return Err(ZoningError::NoSamples);
	}
	Ok(samples)
}

/// Greedy max-min-distance selection (spatial inhibition).
///
/// The first point is drawn uniformly; each further pick maximizes the
/// minimum distance to the points already selected. Ties resolve to the
/// lower candidate index, i.e. the earlier pixel in scan order.
fn farthest_point_selection(points: &[(f64, f64)], n_target: usize, rng: &mut SmallRng) -> Vec<usize> {
	let mut selected = Vec::with_capacity(n_target);
	let mut chosen = vec![false; points.len()];
	let mut min_dist_sq = vec![f64::INFINITY; points.len()];

	let mut latest = rng.gen_range(0..points.len());
	selected.push(latest);
	chosen[latest] = true;

	while selected.len() < n_target {
		let (lx, ly) = points[latest];
		let mut best: Option<usize> = None;
		let mut best_dist = f64::NEG_INFINITY;
		for (i, &(x, y)) in points.iter().enumerate() {
			if chosen[i] {
				continue;
			}
			let dist_sq = (x - lx).powi(2) + (y - ly).powi(2);
			if dist_sq < min_dist_sq[i] {
				min_dist_sq[i] = dist_sq;
			}
			if min_dist_sq[i] > best_dist {
				best = Some(i);
				best_dist = min_dist_sq[i];
			}
		}
		let Some(next) = best else { break };
		selected.push(next);
		chosen[next] = true;
		latest = next;
	}

	selected
}
