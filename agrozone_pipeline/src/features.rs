//! Feature matrix preparation: extraction, imputation, standardization and
//! optional dimensionality reduction.

use agrozone_core::{IndexStack, Result, ValidMask, ZoningConfig, ZoningError};
use linfa::prelude::*;
use linfa_reduction::Pca;
use ndarray::{Array2, s};

/// Columns whose standard deviation falls below this are treated as
/// constant and zeroed out.
const VARIANCE_FLOOR: f64 = 1e-12;

/// Builds the `(N, D)` feature matrix for clustering.
///
/// Rows are the valid pixels in mask scan order; columns are the indices in
/// insertion order. Residual non-finite entries are imputed with the column
/// median, columns are standardized to zero mean and unit variance
/// (constant columns become exactly zero), and PCA optionally reduces the
/// column count to the smallest prefix reaching `pca_variance` cumulative
/// explained variance.
///
/// # Errors
/// Returns [`ZoningError::DegenerateFeature`] when fewer than two pixels
/// are valid, a column has no finite value, or every column is constant.
pub fn prepare_features(indices: &IndexStack, mask: &ValidMask, config: &ZoningConfig) -> Result<Array2<f64>> {
	let n = mask.count();
	let d = indices.len();
	if n < 2 {
		return Err(ZoningError::DegenerateFeature(format!(
			"{n} valid pixels, need at least 2"
		)));
	}

	let mut features = Array2::zeros((n, d));
	for (j, (_, values)) in indices.iter().enumerate() {
		for (i, (row, col)) in mask.iter_valid().enumerate() {
			features[[i, j]] = values[[row, col]];
		}
	}

	impute_column_medians(&mut features, indices)?;

	let constant_columns = standardize_columns(&mut features);
	if constant_columns == d {
		return Err(ZoningError::DegenerateFeature(
			"all feature columns have zero variance".to_string(),
		));
	}
	if constant_columns > 0 {
		log::debug!("{constant_columns} of {d} feature columns are constant and were zeroed");
	}

	if config.use_pca {
		let reduced = reduce_dimensions(features, config.pca_variance)?;
		log::debug!("pca retained {} components", reduced.ncols());
		return Ok(reduced);
	}
	Ok(features)
}

/// Replaces non-finite entries with their column median over the finite
/// values.
fn impute_column_medians(features: &mut Array2<f64>, indices: &IndexStack) -> Result<()> {
	for (j, (name, _)) in indices.iter().enumerate() {
		let mut column = features.column_mut(j);
		if column.iter().all(|v| v.is_finite()) {
			continue;
		}
		let mut finite: Vec<f64> = column.iter().copied().filter(|v| v.is_finite()).collect();
		if finite.is_empty() {
			return Err(ZoningError::DegenerateFeature(format!(
				"index {name} has no finite value inside the mask"
			)));
		}
		finite.sort_by(f64::total_cmp);
		let median = if finite.len() % 2 == 1 {
			finite[finite.len() / 2]
		} else {
			f64::midpoint(finite[finite.len() / 2 - 1], finite[finite.len() / 2])
		};
		for value in column.iter_mut() {
			if !value.is_finite() {
				*value = median;
			}
		}
	}
	Ok(())
}

/// Z-score standardization per column (population standard deviation).
/// Constant columns are set to exactly zero; returns how many there were.
fn standardize_columns(features: &mut Array2<f64>) -> usize {
	let n = features.nrows() as f64;
	let mut constant = 0;
	for mut column in features.columns_mut() {
		let mean = column.sum() / n;
		let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
		let std_dev = variance.sqrt();
		if std_dev < VARIANCE_FLOOR {
			column.fill(0.0);
			constant += 1;
		} else {
			column.mapv_inplace(|v| (v - mean) / std_dev);
		}
	}
	constant
}

/// Projects the standardized matrix onto the smallest principal-component
/// prefix whose cumulative explained-variance ratio reaches
/// `target_variance`.
fn reduce_dimensions(features: Array2<f64>, target_variance: f64) -> Result<Array2<f64>> {
	let (n, d) = features.dim();
	let embedding_size = d.min(n);
	let dataset = DatasetBase::from(features);
	let pca = Pca::params(embedding_size)
		.fit(&dataset)
		.map_err(|e| ZoningError::DegenerateFeature(format!("pca failed: {e}")))?;

	let ratios = pca.explained_variance_ratio();
	let mut cumulative = 0.0;
	let mut keep = embedding_size;
	for (i, ratio) in ratios.iter().enumerate() {
		cumulative += ratio;
		if cumulative >= target_variance {
			keep = i + 1;
			break;
		}
	}

	let embedded: Array2<f64> = pca.predict(&dataset);
	Ok(embedded.slice(s![.., ..keep]).to_owned())
}
