//! Matching factory resource names against the registry.
//!
//! A factory name that isn't a registry resource but is a group, site or
//! facility name is most likely a configuration typo and is reported as a
//! mismatch. A name that matches nothing at all is reported as an orphan.
//! Being a resource always wins, whatever other sets the name is also in.

use crate::{
	factory::FactoryIndex,
	registry::{RegistryCategory, RegistryIndex},
};

/// A factory entry whose resource name matched a non-resource registry name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MismatchRecord {
	pub entry: String,
	pub name: String,
	pub category: RegistryCategory,
}

/// Entries referencing names outside the resource set.
///
/// Sorted by matched name, then entry name.
pub fn find_non_resource_matches(
	factory: &FactoryIndex,
	registry: &RegistryIndex,
) -> Vec<MismatchRecord> {
	let mut mismatches = factory
		.iter()
		.filter(|(name, _)| !registry.is_resource(name))
		.filter_map(|(name, entries)| {
			registry
				.non_resource_category(name)
				.map(|category| (name, entries, category))
		})
		.flat_map(|(name, entries, category)| {
			entries.iter().map(move |entry| MismatchRecord {
				entry: entry.clone(),
				name: name.to_string(),
				category,
			})
		})
		.collect::<Vec<_>>();

	mismatches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.entry.cmp(&b.entry)));

	mismatches
}

/// Entries whose resource name is in none of the registry sets.
///
/// Entry names can repeat when one entry is tied to several orphaned names.
pub fn find_non_topology_matches(factory: &FactoryIndex, registry: &RegistryIndex) -> Vec<String> {
	factory
		.iter()
		.filter(|(name, _)| !registry.is_known(name))
		.flat_map(|(_, entries)| entries.iter().cloned())
		.collect()
}

/// Both result lists of one comparison
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reconciliation {
	pub mismatches: Vec<MismatchRecord>,
	pub orphans: Vec<String>,
}

pub fn reconcile(factory: &FactoryIndex, registry: &RegistryIndex) -> Reconciliation {
	Reconciliation {
		mismatches: find_non_resource_matches(factory, registry),
		orphans: find_non_topology_matches(factory, registry),
	}
}
