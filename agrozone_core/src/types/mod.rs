//! Value types shared across the zoning pipeline.

mod cluster_assignment;
mod cluster_metrics;
mod georef;
mod index_stack;
mod sample_point;
mod valid_mask;
mod zone;
mod zoning_result;

pub use cluster_assignment::ClusterAssignment;
pub use cluster_metrics::ClusterMetrics;
pub use georef::RasterGeoref;
pub use index_stack::IndexStack;
pub use sample_point::SamplePoint;
pub use valid_mask::ValidMask;
pub use zone::{IndexStat, Zone};
pub use zoning_result::{ZoneStats, ZoningResult};
