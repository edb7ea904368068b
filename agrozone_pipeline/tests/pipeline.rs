//! End-to-end pipeline scenarios.

use agrozone_pipeline::{IndexStack, RasterGeoref, ZoningConfig, ZoningError, run, run_cancellable};
use geo::{Geometry, Intersects, polygon};
use ndarray::Array2;
use pretty_assertions::assert_eq;

/// One-meter pixels, world equal to pixel space.
fn unit_georef() -> RasterGeoref {
	RasterGeoref::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0).unwrap()
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
	Geometry::Polygon(polygon![
		(x: x0, y: y0),
		(x: x1, y: y0),
		(x: x1, y: y1),
		(x: x0, y: y1),
		(x: x0, y: y0),
	])
}

fn ndvi_stack(values: Array2<f64>) -> IndexStack {
	IndexStack::from_entries([("NDVI", values)]).unwrap()
}

fn base_config() -> ZoningConfig {
	ZoningConfig {
		min_zone_size_ha: 0.0,
		points_per_zone: 1,
		..ZoningConfig::default()
	}
}

#[test]
fn all_nan_input_has_no_valid_pixels() {
	let indices = ndvi_stack(Array2::from_elem((2, 2), f64::NAN));
	let err = run(&indices, &square(0.0, 0.0, 2.0, 2.0), &unit_georef(), "EPSG:32719", &base_config()).unwrap_err();
	assert!(matches!(err, ZoningError::NoValidPixels));
}

#[test]
fn forced_k_above_the_sample_bound_is_rejected() {
	let mut values = Array2::from_elem((2, 2), 0.4);
	values[[1, 1]] = f64::NAN;
	values[[0, 0]] = 0.1;
	values[[0, 1]] = 0.7;
	let indices = ndvi_stack(values);
	let config = ZoningConfig {
		force_k: Some(5),
		..base_config()
	};
	let err = run(&indices, &square(0.0, 0.0, 2.0, 2.0), &unit_georef(), "EPSG:32719", &config).unwrap_err();
	// Three valid pixels admit at most N − 1 = 2 clusters.
	assert!(matches!(err, ZoningError::InvalidClusterCount { force_k: 5, max_k: 2 }));
}

#[test]
fn trivial_two_cluster_field() -> anyhow::Result<()> {
	let indices = ndvi_stack(ndarray::array![[0.1], [0.1], [0.9], [0.9]]);
	let config = ZoningConfig {
		force_k: Some(2),
		..base_config()
	};
	let result = run(&indices, &square(0.0, 0.0, 1.0, 4.0), &unit_georef(), "EPSG:32719", &config)?;

	assert_eq!(result.zones.len(), 2);
	assert_eq!(result.metrics.n_clusters, 2);
	assert_eq!(result.metrics.cluster_sizes.values().copied().collect::<Vec<_>>(), vec![2, 2]);

	// One zone aggregates the low pixels, the other the high pixels.
	let mut means: Vec<f64> = result
		.zones
		.iter()
		.map(|zone| zone.index_stats[0].1.mean)
		.collect();
	means.sort_by(f64::total_cmp);
	assert!((means[0] - 0.1).abs() < 1e-9);
	assert!((means[1] - 0.9).abs() < 1e-9);

	// Each zone covers two 1 m² pixels.
	for zone in &result.zones {
		assert!((zone.area_ha - 2e-4).abs() < 1e-12);
	}
	assert_eq!(result.crs, "EPSG:32719");
	Ok(())
}

#[test]
fn undersized_zones_are_removed() {
	// 97 background pixels, one two-pixel patch and one singleton.
	let mut values = Array2::from_elem((10, 10), 0.1);
	values[[0, 0]] = 0.9;
	values[[5, 5]] = 0.5;
	values[[5, 6]] = 0.5;
	let indices = ndvi_stack(values);
	let config = ZoningConfig {
		force_k: Some(3),
		min_zone_size_ha: 0.0005, // 5 m²
		..base_config()
	};
	let result = run(&indices, &square(0.0, 0.0, 10.0, 10.0), &unit_georef(), "EPSG:32719", &config).unwrap();

	assert_eq!(result.zones.len(), 1);
	let zone = &result.zones[0];
	assert_eq!(zone.zone_id, 0);
	assert!((zone.area_ha - 0.0097).abs() < 1e-12);
	assert!((zone.index_stats[0].1.mean - 0.1).abs() < 1e-9);

	// Metrics still describe the pre-filter clustering.
	assert_eq!(result.metrics.n_clusters, 3);
	let mut sizes: Vec<usize> = result.metrics.cluster_sizes.values().copied().collect();
	sizes.sort_unstable();
	assert_eq!(sizes, vec![1, 2, 97]);
}

#[test]
fn tiny_zones_emit_every_pixel_center_in_scan_order() {
	let indices = ndvi_stack(ndarray::array![[0.1, 0.1, 0.9]]);
	let config = ZoningConfig {
		force_k: Some(2),
		points_per_zone: 10,
		min_zone_size_ha: 0.0,
		..ZoningConfig::default()
	};
	let result = run(&indices, &square(0.0, 0.0, 3.0, 1.0), &unit_georef(), "EPSG:32719", &config).unwrap();

	assert_eq!(result.samples.len(), 3);

	// Zone ids ascend across the sample list.
	let ids: Vec<usize> = result.samples.iter().map(|s| s.zone_id).collect();
	let mut sorted = ids.clone();
	sorted.sort_unstable();
	assert_eq!(ids, sorted);

	// The low-value zone owns the first two pixel centers in scan order.
	let low_zone = result
		.zones
		.iter()
		.find(|zone| (zone.index_stats[0].1.mean - 0.1).abs() < 1e-9)
		.unwrap();
	let low_samples: Vec<_> = result.samples.iter().filter(|s| s.zone_id == low_zone.zone_id).collect();
	assert_eq!(low_samples.len(), 2);
	assert_eq!(low_samples[0].point.x_y(), (0.5, 0.5));
	assert_eq!(low_samples[1].point.x_y(), (1.5, 0.5));

	// Every sample carries the raster value of its hosting pixel.
	for sample in &result.samples {
		let expected = if sample.point.x_y().0 < 2.0 { 0.1 } else { 0.9 };
		assert_eq!(sample.value("NDVI"), Some(expected));
	}
}

/// A deterministic but non-trivial field: two bands with smooth gradients.
fn gradient_stack(height: usize, width: usize) -> IndexStack {
	let ndvi = Array2::from_shape_fn((height, width), |(r, c)| {
		let base = if r < height / 2 { 0.2 } else { 0.7 };
		base + 0.01 * ((r * 7 + c * 3) % 5) as f64
	});
	let ndwi = Array2::from_shape_fn((height, width), |(r, c)| {
		let base = if c < width / 2 { -0.1 } else { 0.3 };
		base + 0.01 * ((r * 3 + c * 11) % 7) as f64
	});
	IndexStack::from_entries([("NDVI", ndvi), ("NDWI", ndwi)]).unwrap()
}

#[test]
fn identical_inputs_and_seed_reproduce_the_run() {
	let indices = gradient_stack(8, 8);
	let field = square(0.0, 0.0, 8.0, 8.0);
	let config = ZoningConfig {
		max_zones: 4,
		..base_config()
	};

	let first = run(&indices, &field, &unit_georef(), "EPSG:32719", &config).unwrap();
	let second = run(&indices, &field, &unit_georef(), "EPSG:32719", &config).unwrap();

	assert_eq!(first.zones, second.zones);
	assert_eq!(first.samples, second.samples);
	assert_eq!(first.zone_stats, second.zone_stats);
	assert_eq!(first.metrics.n_clusters, second.metrics.n_clusters);
	assert_eq!(first.metrics.silhouette, second.metrics.silhouette);
	assert_eq!(first.metrics.calinski_harabasz, second.metrics.calinski_harabasz);
	assert_eq!(first.metrics.inertia, second.metrics.inertia);
	assert_eq!(first.metrics.cluster_sizes, second.metrics.cluster_sizes);
}

#[test]
fn renaming_indices_changes_only_the_attribute_names() {
	let ndvi = Array2::from_shape_fn((6, 6), |(r, c)| {
		let base = if r < 3 { 0.2 } else { 0.8 };
		base + 0.001 * c as f64
	});
	let original = IndexStack::from_entries([("NDVI", ndvi.clone())]).unwrap();
	let renamed = IndexStack::from_entries([("BAND_A", ndvi)]).unwrap();
	let field = square(0.0, 0.0, 6.0, 6.0);
	let config = ZoningConfig {
		force_k: Some(2),
		..base_config()
	};

	let first = run(&original, &field, &unit_georef(), "EPSG:32719", &config).unwrap();
	let second = run(&renamed, &field, &unit_georef(), "EPSG:32719", &config).unwrap();

	assert_eq!(first.zones.len(), second.zones.len());
	for (a, b) in first.zones.iter().zip(second.zones.iter()) {
		assert_eq!(a.geometry, b.geometry);
		assert_eq!(a.index_stats[0].1, b.index_stats[0].1);
		assert_eq!(a.index_stats[0].0, "NDVI");
		assert_eq!(b.index_stats[0].0, "BAND_A");
	}
	for (a, b) in first.samples.iter().zip(second.samples.iter()) {
		assert_eq!(a.point, b.point);
		assert_eq!(a.values[0].1, b.values[0].1);
	}
}

#[test]
fn result_respects_the_structural_invariants() {
	let indices = gradient_stack(9, 7);
	let field = square(0.0, 0.0, 7.0, 9.0);
	let config = ZoningConfig {
		max_zones: 5,
		..base_config()
	};
	let result = run(&indices, &field, &unit_georef(), "EPSG:32719", &config).unwrap();

	// Zone ids form a contiguous prefix.
	for (position, zone) in result.zones.iter().enumerate() {
		assert_eq!(zone.zone_id, position);
		assert!(zone.area_ha >= config.min_zone_size_ha);
	}

	// Cluster sizes cover exactly the valid pixels (all 63 here).
	assert_eq!(result.metrics.cluster_sizes.values().sum::<usize>(), 63);
	assert_eq!(result.metrics.n_clusters, result.metrics.cluster_sizes.len());

	// Every sample lies in its owning zone.
	for sample in &result.samples {
		let zone = result.zones.iter().find(|z| z.zone_id == sample.zone_id).unwrap();
		assert!(
			zone.geometry.intersects(&sample.point),
			"sample {:?} outside zone {}",
			sample.point.x_y(),
			zone.zone_id
		);
	}

	// The statistics table mirrors the zone list.
	assert_eq!(result.zone_stats.len(), result.zones.len());
	for (stats, zone) in result.zone_stats.iter().zip(result.zones.iter()) {
		assert_eq!(stats.zone_id, zone.zone_id);
		assert_eq!(stats.stats, zone.index_stats);
	}
}

#[test]
fn oversized_minimum_area_filters_everything() {
	let indices = gradient_stack(6, 6);
	let config = ZoningConfig {
		min_zone_size_ha: 1000.0,
		force_k: Some(2),
		..ZoningConfig::default()
	};
	let err = run(&indices, &square(0.0, 0.0, 6.0, 6.0), &unit_georef(), "EPSG:32719", &config).unwrap_err();
	assert!(matches!(err, ZoningError::AllZonesFiltered { .. }));
}

#[test]
fn empty_index_stack_is_invalid_input() {
	let err = run(
		&IndexStack::new(),
		&square(0.0, 0.0, 2.0, 2.0),
		&unit_georef(),
		"EPSG:32719",
		&base_config(),
	)
	.unwrap_err();
	assert!(matches!(err, ZoningError::InvalidInput(_)));
}

#[test]
fn missing_crs_is_invalid_input() {
	let indices = ndvi_stack(Array2::from_elem((2, 2), 0.5));
	let err = run(&indices, &square(0.0, 0.0, 2.0, 2.0), &unit_georef(), "  ", &base_config()).unwrap_err();
	assert!(matches!(err, ZoningError::InvalidInput(_)));
}

#[test]
fn cancelled_token_aborts_the_run() {
	let indices = gradient_stack(6, 6);
	let cancel = agrozone_pipeline::CancelToken::new();
	cancel.cancel();
	let err = run_cancellable(
		&indices,
		&square(0.0, 0.0, 6.0, 6.0),
		&unit_georef(),
		"EPSG:32719",
		&base_config(),
		&cancel,
	)
	.unwrap_err();
	assert!(matches!(err, ZoningError::Cancelled));
}

#[test]
fn metrics_serialize_to_the_documented_schema() {
	let indices = gradient_stack(6, 6);
	let config = ZoningConfig {
		force_k: Some(2),
		..base_config()
	};
	let result = run(&indices, &square(0.0, 0.0, 6.0, 6.0), &unit_georef(), "EPSG:32719", &config).unwrap();

	let json = serde_json::to_value(&result.metrics).unwrap();
	for key in ["n_clusters", "silhouette", "calinski_harabasz", "inertia", "cluster_sizes", "timestamp"] {
		assert!(json.get(key).is_some(), "missing metrics key {key}");
	}
	assert!(json["cluster_sizes"].is_object());
}

#[test]
fn whole_result_round_trips_through_serde() {
	let indices = gradient_stack(6, 6);
	let config = ZoningConfig {
		force_k: Some(2),
		..base_config()
	};
	let result = run(&indices, &square(0.0, 0.0, 6.0, 6.0), &unit_georef(), "EPSG:32719", &config).unwrap();

	let json = serde_json::to_string(&result).unwrap();
	let restored: agrozone_pipeline::ZoningResult = serde_json::from_str(&json).unwrap();
	assert_eq!(restored, result);
}

#[test]
fn zone_table_csv_carries_per_index_columns() {
	let indices = gradient_stack(6, 6);
	let config = ZoningConfig {
		force_k: Some(2),
		..base_config()
	};
	let result = run(&indices, &square(0.0, 0.0, 6.0, 6.0), &unit_georef(), "EPSG:32719", &config).unwrap();

	let csv = agrozone_core::utils::zone_table_csv(&result.zones);
	let header = csv.lines().next().unwrap();
	assert_eq!(
		header,
		"zone_id,area_ha,perimeter_m,compactness,NDVI_mean,NDVI_std,NDWI_mean,NDWI_std"
	);
	assert_eq!(csv.lines().count(), result.zones.len() + 1);
}
