//! Plain text rendering of a comparison.

use std::collections::BTreeSet;

use crate::reconcile::MismatchRecord;

const MISMATCH_HEADER: &str =
	"Factory entries that match a Topology entity other than a resource: ";
const ORPHAN_HEADER: &str = "Factory entries that do not match any entity in Topology: ";

/// Mismatches are listed as given; orphans are deduplicated and sorted.
pub fn render(mismatches: &[MismatchRecord], orphans: &[String]) -> String {
	let mut output = String::new();

	output.push_str(&format!("\n{MISMATCH_HEADER}\n\n"));
	for MismatchRecord { entry, name, .. } in mismatches {
		output.push_str(&format!("- {entry}: {name}\n"));
	}

	output.push_str(&format!("\n{ORPHAN_HEADER}\n\n"));
	for orphan in orphans.iter().collect::<BTreeSet<_>>() {
		output.push_str(&format!("- {orphan}\n"));
	}

	output.push('\n');

	output
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::registry::RegistryCategory;

	#[test]
	fn renders_both_sections() {
		let mismatches = [MismatchRecord {
			entry: "EntryA".to_string(),
			name: "S1".to_string(),
			category: RegistryCategory::Site,
		}];
		let orphans = ["EntryC".to_string(), "EntryB".to_string(), "EntryC".to_string()];

		assert_eq!(
			render(&mismatches, &orphans),
			"\nFactory entries that match a Topology entity other than a resource: \n\n\
			 - EntryA: S1\n\
			 \nFactory entries that do not match any entity in Topology: \n\n\
			 - EntryB\n\
			 - EntryC\n\
			 \n"
		);
	}

	#[test]
	fn empty_report_still_has_headers() {
		assert_eq!(
			render(&[], &[]),
			"\nFactory entries that match a Topology entity other than a resource: \n\n\
			 \nFactory entries that do not match any entity in Topology: \n\n\
			 \n"
		);
	}
}
