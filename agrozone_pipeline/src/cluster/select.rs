//! Cluster-count selection.

use super::fit::fit_kmeans;
use super::quality;
use agrozone_core::{Result, ZoningConfig, ZoningError};
use ndarray::Array2;

struct Candidate {
	k: usize,
	silhouette: f64,
	calinski_harabasz: f64,
}

/// Picks the cluster count for the run.
///
/// With `force_k` set, validates it against `[2, min(max_zones, N − 1)]`
/// and returns it. Otherwise every admissible count is fitted and scored;
/// the highest silhouette wins, ties resolve to the higher
/// Calinski–Harabasz index and then to the smaller count.
///
/// # Errors
/// - [`ZoningError::InvalidClusterCount`] when `force_k` is out of range.
/// - [`ZoningError::InsufficientSamples`] when fewer than three samples
///   leave no admissible candidate.
/// - [`ZoningError::ClusteringFailure`] when every candidate degenerates to
///   fewer than two non-empty clusters.
pub fn select_cluster_count(features: &Array2<f64>, config: &ZoningConfig) -> Result<usize> {
	let n = features.nrows();
	let max_k = config.max_zones.min(n.saturating_sub(1));

	if let Some(force_k) = config.force_k {
		if force_k < 2 || force_k > max_k {
			return Err(ZoningError::InvalidClusterCount { force_k, max_k });
		}
		log::debug!("cluster count forced to {force_k}");
		return Ok(force_k);
	}

	if n < 3 {
		return Err(ZoningError::InsufficientSamples { n });
	}

	let mut best: Option<Candidate> = None;
	for k in 2..=max_k {
		let Ok(fitted) = fit_kmeans(features, k, config.seed) else {
			continue;
		};
		if quality::non_empty_clusters(&fitted.labels, k) < 2 {
			continue;
		}

		let candidate = Candidate {
			k,
			silhouette: quality::silhouette_score(features, &fitted.labels, k),
			calinski_harabasz: quality::calinski_harabasz_score(features, &fitted.labels, k),
		};
		let inertia = quality::inertia(features, &fitted.labels, &fitted.centroids);
		log::debug!(
			"k = {k}: silhouette = {:.4}, calinski_harabasz = {:.2}, inertia = {:.4}",
			candidate.silhouette,
			candidate.calinski_harabasz,
			inertia
		);

		let better = match &best {
			None => true,
			Some(current) => {
				candidate.silhouette > current.silhouette
					|| (candidate.silhouette == current.silhouette
						&& candidate.calinski_harabasz > current.calinski_harabasz)
			}
		};
		if better {
			best = Some(candidate);
		}
	}

	best.map(|candidate| candidate.k).ok_or_else(|| {
		ZoningError::ClusteringFailure("no candidate count produced two non-empty clusters".to_string())
	})
}
