use std::path::Path;

use fc_utils::non_empty_text;
use serde::Deserialize;
use tracing::info;

use super::{FactoryIndex, LoadedDocument, SkippedEntry, RESOURCE_NAME_ATTR};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct GlideinElement {
	#[serde(default)]
	entries: Vec<EntriesElement>,
}

#[derive(Debug, Deserialize)]
struct EntriesElement {
	#[serde(rename = "entry", default)]
	entries: Vec<EntryElement>,
}

#[derive(Debug, Deserialize)]
struct EntryElement {
	#[serde(rename = "@name", default)]
	name: Option<String>,
	#[serde(rename = "@enabled", default)]
	enabled: Option<String>,
	#[serde(default)]
	attrs: Vec<AttrsElement>,
}

#[derive(Debug, Deserialize)]
struct AttrsElement {
	#[serde(rename = "attr", default)]
	attrs: Vec<AttrElement>,
}

#[derive(Debug, Deserialize)]
struct AttrElement {
	#[serde(rename = "@name", default)]
	name: Option<String>,
	#[serde(rename = "@value", default)]
	value: Option<String>,
}

impl EntryElement {
	fn is_enabled(&self) -> bool {
		self.enabled.as_deref() == Some("True")
	}

	/// The first `GLIDEIN_ResourceName` attribute, if the entry has one
	fn resource_attr(&self) -> Option<&AttrElement> {
		self.attrs
			.iter()
			.flat_map(|attrs| &attrs.attrs)
			.find(|attr| attr.name.as_deref() == Some(RESOURCE_NAME_ATTR))
	}
}

pub(super) fn parse(path: &Path, contents: &str, factory_dump: bool) -> Result<LoadedDocument> {
	let glidein = quick_xml::de::from_str::<GlideinElement>(contents).map_err(|source| {
		Error::ParseFactoryXml {
			path: path.display().to_string(),
			source,
		}
	})?;

	let mut index = FactoryIndex::new();
	let mut skipped = Vec::new();

	for entry in glidein.entries.into_iter().flat_map(|entries| entries.entries) {
		if !entry.is_enabled() {
			continue;
		}

		let Some(attr) = entry.resource_attr() else {
			continue;
		};

		let Some(entry_name) = non_empty_text(entry.name.clone()) else {
			skipped.push(SkippedEntry::new(path, None, "enabled entry without a name"));
			continue;
		};

		let Some(resource_name) = non_empty_text(attr.value.clone()) else {
			skipped.push(SkippedEntry::new(
				path,
				Some(entry_name.as_str()),
				format!("{RESOURCE_NAME_ATTR} has no value"),
			));
			continue;
		};

		if factory_dump {
			info!("{resource_name}");
		}

		index.insert(resource_name, entry_name);
	}

	Ok(LoadedDocument { index, skipped })
}
