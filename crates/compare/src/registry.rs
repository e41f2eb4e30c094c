//! Topology registry: the canonical set of resource group, facility, site and
//! resource names.

use std::{collections::HashSet, fmt};

use fc_utils::non_empty_text;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegistryCategory {
	ResourceGroup,
	Facility,
	Site,
	Resource,
}

impl fmt::Display for RegistryCategory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::ResourceGroup => "resource group",
			Self::Facility => "facility",
			Self::Site => "site",
			Self::Resource => "resource",
		})
	}
}

/// Names known to the topology registry, one set per category.
///
/// A name may show up in more than one set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegistryIndex {
	pub resource_groups: HashSet<String>,
	pub facilities: HashSet<String>,
	pub sites: HashSet<String>,
	pub resources: HashSet<String>,
}

impl RegistryIndex {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, category: RegistryCategory, name: impl Into<String>) -> bool {
		self.set_mut(category).insert(name.into())
	}

	pub fn set(&self, category: RegistryCategory) -> &HashSet<String> {
		match category {
			RegistryCategory::ResourceGroup => &self.resource_groups,
			RegistryCategory::Facility => &self.facilities,
			RegistryCategory::Site => &self.sites,
			RegistryCategory::Resource => &self.resources,
		}
	}

	fn set_mut(&mut self, category: RegistryCategory) -> &mut HashSet<String> {
		match category {
			RegistryCategory::ResourceGroup => &mut self.resource_groups,
			RegistryCategory::Facility => &mut self.facilities,
			RegistryCategory::Site => &mut self.sites,
			RegistryCategory::Resource => &mut self.resources,
		}
	}

	pub fn is_resource(&self, name: &str) -> bool {
		self.resources.contains(name)
	}

	/// First non-resource category holding `name`, checking groups, then sites, then facilities
	pub fn non_resource_category(&self, name: &str) -> Option<RegistryCategory> {
		[
			RegistryCategory::ResourceGroup,
			RegistryCategory::Site,
			RegistryCategory::Facility,
		]
		.into_iter()
		.find(|&category| self.set(category).contains(name))
	}

	/// Whether `name` appears in any of the four sets
	pub fn is_known(&self, name: &str) -> bool {
		self.is_resource(name) || self.non_resource_category(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.resource_groups.len() + self.facilities.len() + self.sites.len() + self.resources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

// Only the parts of the rgsummary document we need; everything else is ignored.

#[derive(Debug, Deserialize)]
struct ResourceSummary {
	#[serde(rename = "ResourceGroup", default)]
	resource_groups: Vec<ResourceGroupElement>,
}

#[derive(Debug, Deserialize)]
struct ResourceGroupElement {
	#[serde(rename = "GroupName", default)]
	group_name: Option<String>,
	#[serde(rename = "Facility", default)]
	facilities: Vec<NamedElement>,
	#[serde(rename = "Site", default)]
	sites: Vec<NamedElement>,
	#[serde(rename = "Resources", default)]
	resources: Vec<ResourcesElement>,
}

#[derive(Debug, Deserialize)]
struct ResourcesElement {
	#[serde(rename = "Resource", default)]
	resources: Vec<NamedElement>,
}

#[derive(Debug, Deserialize)]
struct NamedElement {
	#[serde(rename = "Name", default)]
	name: Option<String>,
}

/// Download the registry document.
pub fn fetch_registry(url: &str) -> Result<String> {
	debug!(%url, "Fetching topology registry");

	reqwest::blocking::get(url)
		.and_then(|response| response.error_for_status())
		.and_then(|response| response.text())
		.map_err(|source| Error::FetchRegistry {
			url: url.to_string(),
			source,
		})
}

/// Parse an rgsummary XML document into a [`RegistryIndex`].
///
/// With `tree_dump` set, every name is logged as it is indexed:
/// ```text
/// | group
/// | ---- facility or site
/// | >>>> resource
/// ```
pub fn parse_registry(xml: &str, tree_dump: bool) -> Result<RegistryIndex> {
	let summary = quick_xml::de::from_str::<ResourceSummary>(xml).map_err(Error::ParseRegistry)?;

	let mut index = RegistryIndex::new();

	for group in summary.resource_groups {
		if let Some(name) = non_empty_text(group.group_name) {
			if tree_dump {
				info!("| {name}");
			}
			index.insert(RegistryCategory::ResourceGroup, name);
		}

		for facility in group.facilities {
			if let Some(name) = non_empty_text(facility.name) {
				if tree_dump {
					info!("| ---- {name}");
				}
				index.insert(RegistryCategory::Facility, name);
			}
		}

		for site in group.sites {
			if let Some(name) = non_empty_text(site.name) {
				if tree_dump {
					info!("| ---- {name}");
				}
				index.insert(RegistryCategory::Site, name);
			}
		}

		for resource in group.resources.into_iter().flat_map(|block| block.resources) {
			if let Some(name) = non_empty_text(resource.name) {
				if tree_dump {
					info!("| >>>> {name}");
				}
				index.insert(RegistryCategory::Resource, name);
			}
		}
	}

	debug!(
		resource_groups = index.resource_groups.len(),
		facilities = index.facilities.len(),
		sites = index.sites.len(),
		resources = index.resources.len(),
		"Indexed topology registry"
	);

	Ok(index)
}

/// Fetch and parse the registry in one go.
pub fn load_registry(url: &str, tree_dump: bool) -> Result<RegistryIndex> {
	parse_registry(&fetch_registry(url)?, tree_dump)
}
