use crate::{Result, ZoningError};
use ndarray::Array2;

/// Insertion-ordered mapping from spectral index name (e.g. `NDVI`) to its
/// per-pixel raster.
///
/// All rasters share one `(height, width)` shape; values may be non-finite
/// where data is missing. Insertion order is preserved and drives every
/// downstream ordering: feature columns, sample attributes and the columns
/// of the statistics table.
///
/// # Examples
/// ```
/// use agrozone_core::IndexStack;
/// use ndarray::array;
///
/// let mut stack = IndexStack::new();
/// stack.insert("NDVI", array![[0.2, 0.4], [0.6, 0.8]]).unwrap();
/// stack.insert("NDRE", array![[0.1, 0.2], [0.3, 0.4]]).unwrap();
/// assert_eq!(stack.dims(), Some((2, 2)));
/// assert_eq!(stack.names().collect::<Vec<_>>(), vec!["NDVI", "NDRE"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexStack {
	entries: Vec<(String, Array2<f64>)>,
}

impl IndexStack {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an index raster, replacing the values of an existing name in
	/// place (the original position is kept).
	///
	/// # Errors
	/// Returns [`ZoningError::InvalidInput`] if the shape differs from the
	/// rasters already present.
	pub fn insert(&mut self, name: impl Into<String>, values: Array2<f64>) -> Result<()> {
		let name = name.into();
		if let Some((h, w)) = self.dims() {
			if values.dim() != (h, w) {
				return Err(ZoningError::InvalidInput(format!(
					"index {name} has shape {:?}, expected ({h}, {w})",
					values.dim()
				)));
			}
		}
		match self.entries.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = values,
			None => self.entries.push((name, values)),
		}
		Ok(())
	}

	/// Builds a stack from `(name, raster)` pairs, preserving their order.
	pub fn from_entries<N, I>(entries: I) -> Result<Self>
	where
		N: Into<String>,
		I: IntoIterator<Item = (N, Array2<f64>)>,
	{
		let mut stack = Self::new();
		for (name, values) in entries {
			stack.insert(name, values)?;
		}
		Ok(stack)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Shared `(height, width)` of the rasters, or `None` when empty.
	#[must_use]
	pub fn dims(&self) -> Option<(usize, usize)> {
		self.entries.first().map(|(_, values)| values.dim())
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Array2<f64>> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, values)| values)
	}

	/// Index names in insertion order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(name, _)| name.as_str())
	}

	/// `(name, raster)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Array2<f64>)> {
		self.entries.iter().map(|(name, values)| (name.as_str(), values))
	}

	/// Checks the stack is usable as pipeline input and returns its shape.
	///
	/// # Errors
	/// Returns [`ZoningError::InvalidInput`] when the stack is empty or the
	/// shared shape has a zero dimension.
	pub fn validate(&self) -> Result<(usize, usize)> {
		let Some((height, width)) = self.dims() else {
			return Err(ZoningError::InvalidInput("index stack is empty".to_string()));
		};
		if height == 0 || width == 0 {
			return Err(ZoningError::InvalidInput(format!(
				"index rasters have non-positive dimensions ({height}, {width})"
			)));
		}
		Ok((height, width))
	}
}
