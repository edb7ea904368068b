//! Internal cluster-quality scores on the feature matrix.

use ndarray::{Array2, ArrayView1};

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
	a.iter()
		.zip(b.iter())
		.map(|(x, y)| (x - y).powi(2))
		.sum::<f64>()
		.sqrt()
}

/// Member row indices per label.
fn cluster_members(labels: &[usize], k: usize) -> Vec<Vec<usize>> {
	let mut members = vec![Vec::new(); k];
	for (i, &label) in labels.iter().enumerate() {
		members[label].push(i);
	}
	members
}

/// Number of clusters that actually received samples.
pub fn non_empty_clusters(labels: &[usize], k: usize) -> usize {
	cluster_members(labels, k).iter().filter(|m| !m.is_empty()).count()
}

/// Mean silhouette over all samples, Euclidean distance.
///
/// Per sample: `(b − a) / max(a, b)` with `a` the mean distance to the own
/// cluster and `b` the smallest mean distance to another cluster. A sample
/// alone in its cluster contributes 0.
pub fn silhouette_score(data: &Array2<f64>, labels: &[usize], k: usize) -> f64 {
	let n = data.nrows();
	let members = cluster_members(labels, k);
	let mut total = 0.0;

	for i in 0..n {
		let own = &members[labels[i]];
		if own.len() <= 1 {
			continue;
		}

		let a = own
			.iter()
			.filter(|&&j| j != i)
			.map(|&j| euclidean(data.row(i), data.row(j)))
			.sum::<f64>()
			/ (own.len() - 1) as f64;

		let mut b = f64::INFINITY;
		for (label, other) in members.iter().enumerate() {
			if label == labels[i] || other.is_empty() {
				continue;
			}
			let mean = other.iter().map(|&j| euclidean(data.row(i), data.row(j))).sum::<f64>() / other.len() as f64;
			b = b.min(mean);
		}

		let denom = a.max(b);
		if denom > 0.0 && b.is_finite() {
			total += (b - a) / denom;
		}
	}

	total / n as f64
}

/// Calinski–Harabasz variance-ratio index; higher is better. Infinite when
/// the within-cluster dispersion vanishes.
pub fn calinski_harabasz_score(data: &Array2<f64>, labels: &[usize], k: usize) -> f64 {
	let n = data.nrows();
	let d = data.ncols();
	let members = cluster_members(labels, k);
	let clusters = members.iter().filter(|m| !m.is_empty()).count();
	if clusters < 2 || clusters >= n {
		return 0.0;
	}

	let grand_mean: Vec<f64> = (0..d).map(|j| data.column(j).sum() / n as f64).collect();

	let mut between = 0.0;
	let mut within = 0.0;
	for member in &members {
		if member.is_empty() {
			continue;
		}
		let size = member.len() as f64;
		let centroid: Vec<f64> = (0..d)
			.map(|j| member.iter().map(|&i| data[[i, j]]).sum::<f64>() / size)
			.collect();
		between += size
			* centroid
				.iter()
				.zip(grand_mean.iter())
				.map(|(c, g)| (c - g).powi(2))
				.sum::<f64>();
		for &i in member {
			within += centroid
				.iter()
				.enumerate()
				.map(|(j, c)| (data[[i, j]] - c).powi(2))
				.sum::<f64>();
		}
	}

	if within == 0.0 {
		return f64::INFINITY;
	}
	(between / within) * ((n - clusters) as f64 / (clusters - 1) as f64)
}

/// Sum of squared distances from each sample to its assigned centroid.
pub fn inertia(data: &Array2<f64>, labels: &[usize], centroids: &Array2<f64>) -> f64 {
	labels
		.iter()
		.enumerate()
		.map(|(i, &label)| {
			data.row(i)
				.iter()
				.zip(centroids.row(label).iter())
				.map(|(x, c)| (x - c).powi(2))
				.sum::<f64>()
		})
		.sum()
}
