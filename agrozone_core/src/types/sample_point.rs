use geo::Point;
use serde::{Deserialize, Serialize};

/// A sampling location inside a zone.
///
/// Carries the world coordinates of the hosting pixel center, the final id
/// of the owning zone and the value of every spectral index at that pixel,
/// in index insertion order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
	pub point: Point<f64>,
	pub zone_id: usize,
	pub values: Vec<(String, f64)>,
}

impl SamplePoint {
	/// Value of the named index at this point, if present.
	#[must_use]
	pub fn value(&self, name: &str) -> Option<f64> {
		self.values.iter().find(|(n, _)| n == name).map(|&(_, v)| v)
	}
}
