use super::ValidMask;
use ndarray::Array2;
use std::collections::BTreeMap;

/// Per-pixel cluster labels: `-1` outside the valid mask, `0..K-1` inside.
///
/// Labels keep their clustering-time values for the whole run; the zone
/// filter assigns separate consecutive zone ids and records the mapping on
/// each zone.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterAssignment {
	labels: Array2<i32>,
}

impl ClusterAssignment {
	/// Scatters per-sample labels back onto the grid by mask scan order.
	/// Pixels outside the mask stay at `-1`.
	#[must_use]
	pub fn from_labels(mask: &ValidMask, labels: &[usize]) -> Self {
		let mut grid = Array2::from_elem(mask.dims(), -1_i32);
		for ((row, col), &label) in mask.iter_valid().zip(labels.iter()) {
			grid[[row, col]] = label as i32;
		}
		Self { labels: grid }
	}

	/// `(height, width)` of the label grid.
	#[must_use]
	pub fn dims(&self) -> (usize, usize) {
		self.labels.dim()
	}

	#[must_use]
	pub fn label(&self, row: usize, col: usize) -> i32 {
		self.labels[[row, col]]
	}

	#[must_use]
	pub fn as_array(&self) -> &Array2<i32> {
		&self.labels
	}

	/// Pixel count per non-negative label, ordered by label.
	#[must_use]
	pub fn label_counts(&self) -> BTreeMap<i32, usize> {
		let mut counts = BTreeMap::new();
		for &label in self.labels.iter() {
			if label >= 0 {
				*counts.entry(label).or_insert(0) += 1;
			}
		}
		counts
	}

	/// Number of distinct non-negative labels on the grid.
	#[must_use]
	pub fn distinct_label_count(&self) -> usize {
		self.label_counts().len()
	}

	/// Coordinates of the pixels carrying `label`, in row-major scan order.
	#[must_use]
	pub fn pixels_with_label(&self, label: i32) -> Vec<(usize, usize)> {
		self.labels
			.indexed_iter()
			.filter(|&(_, &l)| l == label)
			.map(|((row, col), _)| (row, col))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ndarray::array;

	fn mask() -> ValidMask {
		ValidMask::new(array![[true, true], [false, true]])
	}

	#[test]
	fn scatter_follows_scan_order() {
		let assignment = ClusterAssignment::from_labels(&mask(), &[0, 1, 0]);
		assert_eq!(assignment.as_array(), &array![[0, 1], [-1, 0]]);
	}

	#[test]
	fn counts_skip_masked_pixels() {
		let assignment = ClusterAssignment::from_labels(&mask(), &[0, 1, 0]);
		let counts = assignment.label_counts();
		assert_eq!(counts.get(&0), Some(&2));
		assert_eq!(counts.get(&1), Some(&1));
		assert_eq!(counts.values().sum::<usize>(), 3);
		assert_eq!(assignment.distinct_label_count(), 2);
	}

	#[test]
	fn pixels_with_label_are_in_scan_order() {
		let assignment = ClusterAssignment::from_labels(&mask(), &[0, 1, 0]);
		assert_eq!(assignment.pixels_with_label(0), vec![(0, 0), (1, 1)]);
		assert_eq!(assignment.pixels_with_label(7), Vec::<(usize, usize)>::new());
	}
}
