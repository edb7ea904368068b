//! Seeded k-means fitting and label-raster reconstruction.

use super::quality;
use agrozone_core::{ClusterAssignment, ClusterMetrics, Result, ValidMask, ZoningError};
use linfa::prelude::*;
use linfa_clustering::KMeans;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const MAX_ITERATIONS: u64 = 300;
const TOLERANCE: f64 = 1e-4;

/// Labels and centroids of one k-means fit.
pub struct FittedClustering {
	pub labels: Vec<usize>,
	pub centroids: Array2<f64>,
}

/// Fits k-means (k-means++ initialization, Lloyd iterations) with a
/// reproducible generator derived from `seed`.
///
/// # Errors
/// Returns [`ZoningError::ClusteringFailure`] when the solver cannot fit.
pub fn fit_kmeans(features: &Array2<f64>, k: usize, seed: u64) -> Result<FittedClustering> {
	let dataset = DatasetBase::from(features.clone());
	let rng = SmallRng::seed_from_u64(seed);
	let model = KMeans::params_with_rng(k, rng)
		.max_n_iterations(MAX_ITERATIONS)
		.tolerance(TOLERANCE)
		.fit(&dataset)
		.map_err(|e| ZoningError::ClusteringFailure(format!("k-means fit with k = {k}: {e}")))?;

	let labels: Vec<usize> = model.predict(&dataset).iter().copied().collect();
	Ok(FittedClustering {
		labels,
		centroids: model.centroids().to_owned(),
	})
}

/// Runs the final clustering: fits `k` clusters, scatters the labels back
/// onto the raster grid and fills the metrics record.
///
/// # Errors
/// Returns [`ZoningError::ClusteringFailure`] when fewer than two clusters
/// end up non-empty.
pub fn cluster(
	features: &Array2<f64>,
	k: usize,
	seed: u64,
	mask: &ValidMask,
) -> Result<(ClusterAssignment, ClusterMetrics)> {
	let fitted = fit_kmeans(features, k, seed)?;
	if quality::non_empty_clusters(&fitted.labels, k) < 2 {
		return Err(ZoningError::ClusteringFailure(format!(
			"k-means with k = {k} produced fewer than 2 non-empty clusters"
		)));
	}

	let assignment = ClusterAssignment::from_labels(mask, &fitted.labels);
	let metrics = ClusterMetrics {
		n_clusters: assignment.distinct_label_count(),
		silhouette: quality::silhouette_score(features, &fitted.labels, k),
		calinski_harabasz: quality::calinski_harabasz_score(features, &fitted.labels, k),
		inertia: quality::inertia(features, &fitted.labels, &fitted.centroids),
		cluster_sizes: assignment.label_counts(),
		timestamp: ClusterMetrics::utc_timestamp(),
	};
	Ok((assignment, metrics))
}
