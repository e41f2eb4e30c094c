//! Factory configuration documents and the resource name index built from them.

use std::{
	collections::{btree_map, BTreeMap},
	fmt,
	path::{Path, PathBuf},
};

use fc_utils::error::FileIOError;
use tracing::debug;

use crate::Result;

mod xml;
mod yaml;

/// Attribute linking a factory entry to a registry resource
pub const RESOURCE_NAME_ATTR: &str = "GLIDEIN_ResourceName";

/// Resource name -> names of the factory entries referencing it.
///
/// Keys iterate in lexical order; entries keep their insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FactoryIndex(BTreeMap<String, Vec<String>>);

impl FactoryIndex {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, resource: impl Into<String>, entry: impl Into<String>) {
		self.0.entry(resource.into()).or_default().push(entry.into());
	}

	/// Fold `other` into `self`, concatenating entry lists of shared resource names
	pub fn merge(&mut self, other: FactoryIndex) {
		for (resource, entries) in other.0 {
			match self.0.entry(resource) {
				btree_map::Entry::Occupied(mut occupied) => occupied.get_mut().extend(entries),
				btree_map::Entry::Vacant(vacant) => {
					vacant.insert(entries);
				}
			}
		}
	}

	pub fn entries(&self, resource: &str) -> &[String] {
		self.0.get(resource).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn resource_names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.0
			.iter()
			.map(|(resource, entries)| (resource.as_str(), entries.as_slice()))
	}

	/// Number of distinct resource names
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn entry_count(&self) -> usize {
		self.0.values().map(Vec::len).sum()
	}
}

impl<R: Into<String>, E: Into<String>> FromIterator<(R, E)> for FactoryIndex {
	fn from_iter<I: IntoIterator<Item = (R, E)>>(iter: I) -> Self {
		let mut index = Self::new();
		for (resource, entry) in iter {
			index.insert(resource, entry);
		}
		index
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
	Xml,
	Yaml,
}

/// A factory configuration file found in the checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryDocument {
	pub path: PathBuf,
	pub kind: DocumentKind,
}

impl FactoryDocument {
	/// Anything not ending in `xml` is read as YAML
	pub fn new(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let kind = if path.to_string_lossy().ends_with("xml") {
			DocumentKind::Xml
		} else {
			DocumentKind::Yaml
		};

		Self { path, kind }
	}
}

/// A factory entry left out of the index because its record was malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
	pub document: PathBuf,
	pub entry: Option<String>,
	pub reason: String,
}

impl SkippedEntry {
	pub(crate) fn new(document: &Path, entry: Option<&str>, reason: impl Into<String>) -> Self {
		Self {
			document: document.to_path_buf(),
			entry: entry.map(str::to_string),
			reason: reason.into(),
		}
	}
}

impl fmt::Display for SkippedEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.entry {
			Some(entry) => write!(
				f,
				"skipped entry '{entry}' in '{}': {}",
				self.document.display(),
				self.reason
			),
			None => write!(
				f,
				"skipped record in '{}': {}",
				self.document.display(),
				self.reason
			),
		}
	}
}

/// Index of a single document plus the records it had to leave out
#[derive(Debug, Default)]
pub struct LoadedDocument {
	pub index: FactoryIndex,
	pub skipped: Vec<SkippedEntry>,
}

/// Read and parse one factory document.
///
/// Fails only when the file can't be read or its top-level structure is
/// invalid; malformed entries end up in [`LoadedDocument::skipped`].
pub fn load_factory_document(
	document: &FactoryDocument,
	factory_dump: bool,
) -> Result<LoadedDocument> {
	let contents = std::fs::read_to_string(&document.path).map_err(|e| {
		FileIOError::with_context(&document.path, e, "failed to read factory document")
	})?;

	let loaded = parse_factory_document(&document.path, document.kind, &contents, factory_dump)?;

	debug!(
		path = %document.path.display(),
		resources = loaded.index.len(),
		entries = loaded.index.entry_count(),
		skipped = loaded.skipped.len(),
		"Loaded factory document"
	);

	Ok(loaded)
}

/// Parse already read document contents; `path` is only used for diagnostics.
pub fn parse_factory_document(
	path: &Path,
	kind: DocumentKind,
	contents: &str,
	factory_dump: bool,
) -> Result<LoadedDocument> {
	match kind {
		DocumentKind::Xml => xml::parse(path, contents, factory_dump),
		DocumentKind::Yaml => yaml::parse(path, contents, factory_dump),
	}
}
