//! Zone attributes and size filtering.

use agrozone_core::{Result, Zone, ZoningError};
use geo::{Area, Euclidean, Length, MultiPolygon};
use std::f64::consts::PI;

const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Total ring length of a multi-polygon, exterior and interior rings alike.
fn perimeter(geometry: &MultiPolygon<f64>) -> f64 {
	geometry
		.iter()
		.map(|polygon| {
			Euclidean.length(polygon.exterior())
				+ polygon.interiors().iter().map(|ring| Euclidean.length(ring)).sum::<f64>()
		})
		.sum()
}

/// Computes geometric attributes, drops zones below `min_zone_size_ha` and
/// assigns consecutive zone ids ascending by original cluster label.
///
/// The cluster assignment raster keeps its original labels; each surviving
/// zone records its label so downstream components can translate.
///
/// # Errors
/// Returns [`ZoningError::AllZonesFiltered`] when nothing survives.
pub fn filter_zones(mut zones: Vec<(i32, MultiPolygon<f64>)>, min_zone_size_ha: f64) -> Result<Vec<Zone>> {
	zones.sort_by_key(|(label, _)| *label);

	let mut kept = Vec::new();
	for (label, geometry) in zones {
		let area_m2 = geometry.unsigned_area();
		let area_ha = area_m2 / SQUARE_METERS_PER_HECTARE;
		if area_ha < min_zone_size_ha {
			log::debug!("dropping zone with label {label}: {area_ha:.6} ha < {min_zone_size_ha} ha");
			continue;
		}

		let perimeter_m = perimeter(&geometry);
		let compactness = if perimeter_m > 0.0 {
			4.0 * PI * area_m2 / (perimeter_m * perimeter_m)
		} else {
			0.0
		};
		kept.push(Zone {
			zone_id: kept.len(),
			cluster_label: label,
			geometry,
			area_ha,
			perimeter_m,
			compactness,
			index_stats: Vec::new(),
		});
	}

	if kept.is_empty() {
		return Err(ZoningError::AllZonesFiltered { min_zone_size_ha });
	}
	Ok(kept)
}
