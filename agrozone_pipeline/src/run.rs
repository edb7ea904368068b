//! Pipeline orchestration.

use crate::{cluster, features, mask, polygonize, sample, stats, zones};
use agrozone_core::{CancelToken, IndexStack, RasterGeoref, Result, ZoningConfig, ZoningError, ZoningResult};
use geo::{MultiPolygon, Validation};
use geo_types::Geometry;

/// Stages of the zoning run, traced at debug level as the pipeline
/// advances. Transitions are strictly linear; any failure aborts the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
	Init,
	Masked,
	Featurized,
	Clustered,
	Polygonized,
	Filtered,
	Sampled,
	Done,
}

fn checkpoint(cancel: &CancelToken, stage: Stage) -> Result<()> {
	if cancel.is_cancelled() {
		return Err(ZoningError::Cancelled);
	}
	log::debug!("pipeline stage: {stage:?}");
	Ok(())
}

/// Runs the full zoning pipeline.
///
/// Consumes an in-memory stack of spectral index rasters, the field polygon
/// (in the same CRS as the georeference), the affine georeference and the
/// run configuration; returns the zones, sampling points, cluster metrics
/// and per-zone statistics. The `crs` identifier is stored on the result
/// unchanged.
///
/// # Errors
/// One of the `ZoningError` kinds; see the crate documentation for the
/// failure conditions of each stage.
pub fn run(
	indices: &IndexStack,
	field_polygon: &Geometry<f64>,
	georef: &RasterGeoref,
	crs: &str,
	config: &ZoningConfig,
) -> Result<ZoningResult> {
	run_cancellable(indices, field_polygon, georef, crs, config, &CancelToken::new())
}

/// Like [`run`], but polls `cancel` between stages. A cancelled run aborts
/// with [`ZoningError::Cancelled`] and returns no partial output.
pub fn run_cancellable(
	indices: &IndexStack,
	field_polygon: &Geometry<f64>,
	georef: &RasterGeoref,
	crs: &str,
	config: &ZoningConfig,
	cancel: &CancelToken,
) -> Result<ZoningResult> {
	config.validate()?;
	let dims = indices.validate()?;
	let field = normalize_field_polygon(field_polygon)?;
	if crs.trim().is_empty() {
		return Err(ZoningError::InvalidInput("crs identifier is missing".to_string()));
	}
	checkpoint(cancel, Stage::Init)?;

	let mask = mask::build_valid_mask(&field, georef, dims, indices)?;
	checkpoint(cancel, Stage::Masked)?;

	let features = features::prepare_features(indices, &mask, config)?;
	checkpoint(cancel, Stage::Featurized)?;

	let k = cluster::select_cluster_count(&features, config)?;
	log::info!("clustering {} valid pixels into {k} clusters", mask.count());
	let (assignment, metrics) = cluster::cluster(&features, k, config.seed, &mask)?;
	checkpoint(cancel, Stage::Clustered)?;

	let raw_zones = polygonize::polygonize(&assignment, georef)?;
	checkpoint(cancel, Stage::Polygonized)?;

	let mut zones = zones::filter_zones(raw_zones, config.min_zone_size_ha)?;
	log::info!(
		"{} of {} zones survive the {} ha size filter",
		zones.len(),
		metrics.n_clusters,
		config.min_zone_size_ha
	);
	checkpoint(cancel, Stage::Filtered)?;

	let samples = sample::sample_zones(&zones, &assignment, indices, georef, config.points_per_zone, config.seed)?;
	checkpoint(cancel, Stage::Sampled)?;

	let zone_stats = stats::compute_zone_stats(&mut zones, &assignment, indices);
	let result = ZoningResult {
		zones,
		samples,
		metrics,
		zone_stats,
		crs: crs.to_string(),
	};
	checkpoint(cancel, Stage::Done)?;
	Ok(result)
}

/// Accepts a polygon or multi-polygon and rejects everything else, empty
/// shells included.
fn normalize_field_polygon(geometry: &Geometry<f64>) -> Result<MultiPolygon<f64>> {
	let field = match geometry {
		Geometry::Polygon(polygon) => MultiPolygon(vec![polygon.clone()]),
		Geometry::MultiPolygon(multi) => multi.clone(),
		other => {
			return Err(ZoningError::InvalidInput(format!(
				"field geometry must be a polygon or multi-polygon, got {}",
				geometry_kind(other)
			)));
		}
	};
	if field.0.is_empty() || field.0.iter().all(|polygon| polygon.exterior().0.is_empty()) {
		return Err(ZoningError::InvalidInput("field polygon is empty".to_string()));
	}
	if !field.is_valid() {
		return Err(ZoningError::InvalidInput("field polygon is not a valid geometry".to_string()));
	}
	Ok(field)
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
	match geometry {
		Geometry::Point(_) => "point",
		Geometry::Line(_) => "line",
		Geometry::LineString(_) => "line string",
		Geometry::Polygon(_) => "polygon",
		Geometry::MultiPoint(_) => "multi-point",
		Geometry::MultiLineString(_) => "multi-line-string",
		Geometry::MultiPolygon(_) => "multi-polygon",
		Geometry::GeometryCollection(_) => "geometry collection",
		Geometry::Rect(_) => "rectangle",
		Geometry::Triangle(_) => "triangle",
	}
}
