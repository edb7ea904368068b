use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag shared between a caller and a running
/// pipeline.
///
/// Clones observe the same flag. The pipeline polls the token between
/// components; a cancelled run aborts with `ZoningError::Cancelled` and
/// returns no partial output.
///
/// # Examples
/// ```
/// use agrozone_core::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// assert!(!token.is_cancelled());
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
	flag: Arc<AtomicBool>,
}

impl CancelToken {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Requests cancellation; visible to every clone of this token.
	pub fn cancel(&self) {
		self.flag.store(true, Ordering::Relaxed);
	}

	#[must_use]
	pub fn is_cancelled(&self) -> bool {
		self.flag.load(Ordering::Relaxed)
	}
}
