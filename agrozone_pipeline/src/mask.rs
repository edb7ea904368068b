//! Valid-pixel mask construction.

use agrozone_core::{IndexStack, RasterGeoref, Result, ValidMask, ZoningError};
use geo::{BoundingRect, Intersects, MultiPolygon, Point};
use ndarray::Array2;

/// Builds the mask of usable pixels: the pixel center lies inside the field
/// polygon and every index has a finite value there.
///
/// Containment is tested at pixel centers with `Intersects`, which keeps
/// boundary points. Pixel centers and polygonized zone footprints therefore
/// agree on pixels the polygon boundary cuts through.
///
/// # Errors
/// Returns [`ZoningError::NoValidPixels`] when no pixel passes both tests.
pub fn build_valid_mask(
	field: &MultiPolygon<f64>,
	georef: &RasterGeoref,
	dims: (usize, usize),
	indices: &IndexStack,
) -> Result<ValidMask> {
	let (height, width) = dims;
	let mut valid = Array2::from_elem((height, width), false);

	// Pixel-center containment, quick-rejected against the field's bounding
	// rectangle.
	if let Some(rect) = field.bounding_rect() {
		let (min, max) = (rect.min(), rect.max());
		for row in 0..height {
			for col in 0..width {
				let (x, y) = georef.pixel_center(row, col);
				if x < min.x || x > max.x || y < min.y || y > max.y {
					continue;
				}
				if field.intersects(&Point::new(x, y)) {
					valid[[row, col]] = true;
				}
			}
		}
	}

	// AND with per-pixel finiteness over every index.
	for (_, values) in indices.iter() {
		for ((row, col), value) in values.indexed_iter() {
			if !value.is_finite() {
				valid[[row, col]] = false;
			}
		}
	}

	let mask = ValidMask::new(valid);
	if mask.count() == 0 {
		return Err(ZoningError::NoValidPixels);
	}
	log::debug!("valid mask covers {} of {} pixels", mask.count(), height * width);
	Ok(mask)
}
