//! Raster-to-polygon conversion.

use agrozone_core::{ClusterAssignment, RasterGeoref, Result, ZoningError};
use geo::{MultiPolygon, Polygon, unary_union};
use std::collections::BTreeMap;

/// Dissolves the label raster into one merged geometry per cluster label,
/// ascending by label.
///
/// Equal-label pixels are first grouped into horizontal runs; each run
/// becomes a world-space quadrilateral through the affine transform and the
/// quadrilaterals are merged per label with a geometric union. The result
/// equals the union of the individual pixel footprints, so disjoint patches
/// of one label come back as a multi-polygon.
///
/// # Errors
/// Returns [`ZoningError::NoZones`] when the raster carries no label.
pub fn polygonize(
	assignment: &ClusterAssignment,
	georef: &RasterGeoref,
) -> Result<Vec<(i32, MultiPolygon<f64>)>> {
	let (height, width) = assignment.dims();
	let mut runs: BTreeMap<i32, Vec<Polygon<f64>>> = BTreeMap::new();

	for row in 0..height {
		let mut col = 0;
		while col < width {
			let label = assignment.label(row, col);
			if label < 0 {
				col += 1;
				continue;
			}
			let start = col;
			while col < width && assignment.label(row, col) == label {
				col += 1;
			}
			runs.entry(label).or_default().push(georef.run_polygon(row, start, col));
		}
	}

	if runs.is_empty() {
		return Err(ZoningError::NoZones);
	}

	let zones = runs
		.into_iter()
		.map(|(label, footprints)| (label, unary_union(&footprints)))
		.collect();
	Ok(zones)
}

#[cfg(test)]
mod tests {
	use super::*;
	use agrozone_core::ValidMask;
	use approx::assert_relative_eq;
	use geo::Area;
	use ndarray::{Array2, array};

	fn unit_georef() -> RasterGeoref {
		RasterGeoref::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0).unwrap()
	}

	fn assignment(mask: Array2<bool>, labels: &[usize]) -> ClusterAssignment {
		ClusterAssignment::from_labels(&ValidMask::new(mask), labels)
	}

	#[test]
	fn labels_come_back_in_ascending_order() {
		let assignment = assignment(Array2::from_elem((2, 2), true), &[1, 1, 0, 0]);
		let zones = polygonize(&assignment, &unit_georef()).unwrap();
		assert_eq!(zones.len(), 2);
		assert_eq!(zones[0].0, 0);
		assert_eq!(zones[1].0, 1);
	}

	#[test]
	fn adjacent_pixels_dissolve_into_one_part() {
		let assignment = assignment(Array2::from_elem((2, 2), true), &[0, 0, 0, 0]);
		let zones = polygonize(&assignment, &unit_georef()).unwrap();
		let (_, geometry) = &zones[0];
		assert_eq!(geometry.0.len(), 1);
		assert_relative_eq!(geometry.unsigned_area(), 4.0, epsilon = 1e-9);
	}

	#[test]
	fn disjoint_patches_become_a_multi_polygon() {
		// Label 0 occupies the two opposite corners of a 3×3 grid.
		let mask = array![
			[true, false, true],
			[false, false, false],
			[false, false, false]
		];
		let assignment = assignment(mask, &[0, 0]);
		let zones = polygonize(&assignment, &unit_georef()).unwrap();
		let (_, geometry) = &zones[0];
		assert_eq!(geometry.0.len(), 2);
		assert_relative_eq!(geometry.unsigned_area(), 2.0, epsilon = 1e-9);
	}

	#[test]
	fn areas_respect_the_pixel_footprint() {
		// 2 m × 2 m pixels.
		let georef = RasterGeoref::new(2.0, 0.0, 0.0, 0.0, -2.0, 100.0).unwrap();
		let assignment = assignment(Array2::from_elem((1, 3), true), &[0, 0, 1]);
		let zones = polygonize(&assignment, &georef).unwrap();
		assert_relative_eq!(zones[0].1.unsigned_area(), 8.0, epsilon = 1e-9);
		assert_relative_eq!(zones[1].1.unsigned_area(), 4.0, epsilon = 1e-9);
	}

	#[test]
	fn unlabeled_raster_yields_no_zones() {
		let assignment = assignment(Array2::from_elem((2, 2), false), &[]);
		let err = polygonize(&assignment, &unit_georef()).unwrap_err();
		assert!(matches!(err, ZoningError::NoZones));
	}
}
