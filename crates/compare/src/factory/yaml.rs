use std::path::Path;

use fc_utils::non_empty_text;
use serde_yaml::Value;
use tracing::info;

use super::{FactoryIndex, LoadedDocument, SkippedEntry, RESOURCE_NAME_ATTR};
use crate::{Error, Result};

// Autoconf documents nest resource -> entry group -> entry name -> config and
// only ever describe active entries, so there is no enabled flag to check.
// Anything below the top level that doesn't fit that shape is skipped.

pub(super) fn parse(path: &Path, contents: &str, factory_dump: bool) -> Result<LoadedDocument> {
	let parse_error = |source: serde_yaml::Error| Error::ParseFactoryYaml {
		path: path.display().to_string(),
		source,
	};

	let mut document = serde_yaml::from_str::<Value>(contents).map_err(parse_error)?;
	// `<<: *anchor` keys are left in place by the parser
	document.apply_merge().map_err(parse_error)?;

	let resources = match document {
		Value::Null => return Ok(LoadedDocument::default()),
		Value::Mapping(resources) => resources,
		_ => {
			return Err(Error::FactoryYamlNotMapping {
				path: path.display().to_string(),
			})
		}
	};

	let mut index = FactoryIndex::new();
	let mut skipped = Vec::new();

	for (resource_key, resource) in resources {
		let Value::Mapping(groups) = resource else {
			skipped.push(SkippedEntry::new(
				path,
				None,
				format!("resource {} is not a mapping", describe(&resource_key)),
			));
			continue;
		};

		for (group_key, group) in groups {
			let Value::Mapping(entries) = group else {
				skipped.push(SkippedEntry::new(
					path,
					None,
					format!("entry group {} is not a mapping", describe(&group_key)),
				));
				continue;
			};

			for (entry_key, config) in entries {
				let Some(entry_name) = scalar_text(&entry_key) else {
					skipped.push(SkippedEntry::new(path, None, "entry name is not a scalar"));
					continue;
				};

				match resource_name(&config) {
					Ok(resource_name) => {
						if factory_dump {
							info!("{resource_name}");
						}
						index.insert(resource_name, entry_name);
					}
					Err(reason) => {
						skipped.push(SkippedEntry::new(path, Some(entry_name.as_str()), reason))
					}
				}
			}
		}
	}

	Ok(LoadedDocument { index, skipped })
}

/// `attrs.GLIDEIN_ResourceName`, either a bare scalar or `{ value: ... }`
fn resource_name(config: &Value) -> std::result::Result<String, &'static str> {
	let attr = config
		.get("attrs")
		.ok_or("no attrs")?
		.get(RESOURCE_NAME_ATTR)
		.ok_or("no GLIDEIN_ResourceName attribute")?;

	let value = match attr {
		Value::Mapping(attr) => attr
			.get("value")
			.ok_or("GLIDEIN_ResourceName has no value")?,
		bare => bare,
	};

	scalar_text(value).ok_or("GLIDEIN_ResourceName value is not a non-empty scalar")
}

fn scalar_text(value: &Value) -> Option<String> {
	let text = match value {
		Value::String(s) => s.clone(),
		Value::Number(n) => n.to_string(),
		Value::Bool(b) => b.to_string(),
		_ => return None,
	};

	non_empty_text(Some(text))
}

fn describe(key: &Value) -> String {
	scalar_text(key)
		.map(|key| format!("'{key}'"))
		.unwrap_or_else(|| "<non-scalar key>".to_string())
}
