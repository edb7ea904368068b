use crate::{Result, ZoningError};
use serde::{Deserialize, Serialize};

/// Tuning knobs for a single zoning run.
///
/// All fields have working defaults; `validate` rejects values outside their
/// documented domains before the pipeline touches any data.
///
/// # Examples
/// ```
/// use agrozone_core::ZoningConfig;
///
/// let config = ZoningConfig::default();
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.max_zones, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoningConfig {
	/// Seed for every random decision in the run; identical inputs and seed
	/// reproduce the run bit for bit.
	pub seed: u64,
	/// Zones smaller than this (hectares) are dropped after polygonization.
	pub min_zone_size_ha: f64,
	/// Upper bound on the evaluated cluster counts.
	pub max_zones: usize,
	/// Skip cluster-count selection and use exactly this count.
	pub force_k: Option<usize>,
	/// Minimum number of sampling points placed in each zone.
	pub points_per_zone: usize,
	/// Reduce feature dimensionality with PCA before clustering.
	pub use_pca: bool,
	/// Cumulative explained-variance ratio retained by PCA, in `(0, 1]`.
	pub pca_variance: f64,
}

impl Default for ZoningConfig {
	fn default() -> Self {
		Self {
			seed: 42,
			min_zone_size_ha: 0.5,
			max_zones: 10,
			force_k: None,
			points_per_zone: 5,
			use_pca: false,
			pca_variance: 0.95,
		}
	}
}

impl ZoningConfig {
	/// Checks every field against its documented domain.
	///
	/// # Errors
	/// Returns [`ZoningError::InvalidInput`] naming the offending field.
	pub fn validate(&self) -> Result<()> {
		if self.max_zones < 2 {
			return Err(ZoningError::InvalidInput(format!(
				"max_zones must be at least 2, got {}",
				self.max_zones
			)));
		}
		if self.points_per_zone < 1 {
			return Err(ZoningError::InvalidInput("points_per_zone must be at least 1".to_string()));
		}
		if !self.min_zone_size_ha.is_finite() || self.min_zone_size_ha < 0.0 {
			return Err(ZoningError::InvalidInput(format!(
				"min_zone_size_ha must be finite and non-negative, got {}",
				self.min_zone_size_ha
			)));
		}
		if !self.pca_variance.is_finite() || self.pca_variance <= 0.0 || self.pca_variance > 1.0 {
			return Err(ZoningError::InvalidInput(format!(
				"pca_variance must lie in (0, 1], got {}",
				self.pca_variance
			)));
		}
		if let Some(force_k) = self.force_k {
			if force_k < 2 {
				return Err(ZoningError::InvalidInput(format!("force_k must be at least 2, got {force_k}")));
			}
		}
		Ok(())
	}
}
