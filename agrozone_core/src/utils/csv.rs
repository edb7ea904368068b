//! CSV rendering of the per-zone statistics table.
//!
//! One row per zone with the columns `zone_id`, `area_ha`, `perimeter_m`,
//! `compactness`, then `NAME_mean` and `NAME_std` for every index in
//! insertion order. Fields follow RFC 4180 quoting rules.

use crate::types::Zone;

/// Quotes a field when it contains a separator, quote or line break.
fn escape_field(field: &str) -> String {
	if field.contains([',', '"', '\n', '\r']) {
		format!("\"{}\"", field.replace('"', "\"\""))
	} else {
		field.to_string()
	}
}

/// Renders the zone statistics table as CSV text.
///
/// The index columns are taken from the first zone; every zone of one run
/// carries the same indices in the same order.
#[must_use]
pub fn zone_table_csv(zones: &[Zone]) -> String {
	let mut header = vec![
		"zone_id".to_string(),
		"area_ha".to_string(),
		"perimeter_m".to_string(),
		"compactness".to_string(),
	];
	if let Some(first) = zones.first() {
		for (name, _) in &first.index_stats {
			header.push(escape_field(&format!("{name}_mean")));
			header.push(escape_field(&format!("{name}_std")));
		}
	}

	let mut out = header.join(",");
	out.push('\n');

	for zone in zones {
		let mut row = vec![
			zone.zone_id.to_string(),
			zone.area_ha.to_string(),
			zone.perimeter_m.to_string(),
			zone.compactness.to_string(),
		];
		for (_, stat) in &zone.index_stats {
			row.push(stat.mean.to_string());
			row.push(stat.std_dev.to_string());
		}
		out.push_str(&row.join(","));
		out.push('\n');
	}
	out
}
