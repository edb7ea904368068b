use crate::{Result, ZoningError};
use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Affine mapping from pixel space to world coordinates.
///
/// Six coefficients `(a, b, c, d, e, f)` map a pixel-space position
/// `(col, row)` to world coordinates:
///
/// ```text
/// x = a·col + b·row + c
/// y = d·col + e·row + f
/// ```
///
/// Pixel `(row, col)` covers the unit square `[col, col+1) × [row, row+1)` in
/// pixel space, so its center sits at pixel-space `(col + 0.5, row + 0.5)`.
/// The footprint of one pixel in world space is `|a·e − b·d|` (square meters
/// for a projected CRS in meters).
///
/// # Examples
/// ```
/// use agrozone_core::RasterGeoref;
///
/// // 10 m pixels, origin at (500_000, 8_000_000), north-up.
/// let georef = RasterGeoref::new(10.0, 0.0, 500_000.0, 0.0, -10.0, 8_000_000.0).unwrap();
/// assert_eq!(georef.pixel_center(0, 0), (500_005.0, 7_999_995.0));
/// assert_eq!(georef.pixel_area(), 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RasterGeoref {
	a: f64,
	b: f64,
	c: f64,
	d: f64,
	e: f64,
	f: f64,
}

impl RasterGeoref {
	/// Builds a georeference from the six affine coefficients.
	///
	/// # Errors
	/// Returns [`ZoningError::InvalidInput`] if any coefficient is non-finite
	/// or the mapping collapses pixels to zero area.
	pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Result<Self> {
		let georef = Self { a, b, c, d, e, f };
		if ![a, b, c, d, e, f].iter().all(|v| v.is_finite()) {
			return Err(ZoningError::InvalidInput(
				"georeference coefficients must all be finite".to_string(),
			));
		}
		if georef.pixel_area() <= 0.0 {
			return Err(ZoningError::InvalidInput(
				"georeference is degenerate: pixels have zero area".to_string(),
			));
		}
		Ok(georef)
	}

	/// The six coefficients `(a, b, c, d, e, f)` in row-major convention.
	#[must_use]
	pub fn coefficients(&self) -> [f64; 6] {
		[self.a, self.b, self.c, self.d, self.e, self.f]
	}

	/// Maps a pixel-space position (fractional `col`, `row`) to world
	/// coordinates.
	#[must_use]
	pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
		(
			self.a * col + self.b * row + self.c,
			self.d * col + self.e * row + self.f,
		)
	}

	/// World coordinates of the center of pixel `(row, col)`.
	#[must_use]
	pub fn pixel_center(&self, row: usize, col: usize) -> (f64, f64) {
		self.apply(col as f64 + 0.5, row as f64 + 0.5)
	}

	/// Area of a single pixel footprint: `|a·e − b·d|`.
	#[must_use]
	pub fn pixel_area(&self) -> f64 {
		(self.a * self.e - self.b * self.d).abs()
	}

	/// World-space footprint of pixel `(row, col)`.
	#[must_use]
	pub fn pixel_polygon(&self, row: usize, col: usize) -> Polygon<f64> {
		self.run_polygon(row, col, col + 1)
	}

	/// World-space footprint of the horizontal pixel run
	/// `[col_start, col_end)` within `row`.
	///
	/// For an axis-aligned georeference this is a rectangle; with rotation
	/// terms it is a parallelogram. Unioning run footprints of a label gives
	/// exactly the union of its per-pixel footprints.
	#[must_use]
	pub fn run_polygon(&self, row: usize, col_start: usize, col_end: usize) -> Polygon<f64> {
		let (r0, r1) = (row as f64, row as f64 + 1.0);
		let (c0, c1) = (col_start as f64, col_end as f64);
		let corners = [
			self.apply(c0, r0),
			self.apply(c1, r0),
			self.apply(c1, r1),
			self.apply(c0, r1),
			self.apply(c0, r0),
		];
		Polygon::new(
			LineString::from(corners.iter().map(|&(x, y)| Coord { x, y }).collect::<Vec<_>>()),
			vec![],
		)
	}
}
