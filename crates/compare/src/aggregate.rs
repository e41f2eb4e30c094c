//! Merging every factory document of a checkout into one index.

use tracing::{debug, warn};

use crate::{
	factory::{load_factory_document, FactoryDocument, FactoryIndex, LoadedDocument, SkippedEntry},
	Result,
};

/// Combined index of all documents, along with every record that was skipped
#[derive(Debug, Default)]
pub struct Aggregate {
	pub index: FactoryIndex,
	pub skipped: Vec<SkippedEntry>,
}

impl Aggregate {
	pub fn absorb(&mut self, loaded: LoadedDocument) {
		self.index.merge(loaded.index);
		self.skipped.extend(loaded.skipped);
	}
}

/// Load every document in order and merge the results.
///
/// The first document that fails to load aborts the whole merge.
pub fn merge<'a>(
	documents: impl IntoIterator<Item = &'a FactoryDocument>,
	factory_dump: bool,
) -> Result<Aggregate> {
	let mut aggregate = Aggregate::default();
	let mut document_count = 0usize;

	for document in documents {
		aggregate.absorb(load_factory_document(document, factory_dump)?);
		document_count += 1;
	}

	for skipped in &aggregate.skipped {
		warn!("{skipped}");
	}

	if !aggregate.skipped.is_empty() {
		warn!(
			count = aggregate.skipped.len(),
			"Skipped malformed factory entries"
		);
	}

	debug!(
		documents = document_count,
		resources = aggregate.index.len(),
		entries = aggregate.index.entry_count(),
		"Merged factory documents"
	);

	Ok(aggregate)
}

#[cfg(test)]
mod tests {
	use std::{fs, path::Path};

	use tempfile::TempDir;
	use tracing_test::traced_test;

	use super::*;

	fn write(dir: &Path, name: &str, contents: &str) -> FactoryDocument {
		let path = dir.join(name);
		fs::write(&path, contents).expect("write fixture");
		FactoryDocument::new(path)
	}

	#[test]
	fn same_resource_from_two_documents_is_concatenated() {
		let dir = TempDir::new().expect("temp dir");
		let documents = [
			write(
				dir.path(),
				"a.xml",
				r#"<glidein><entries><entry name="EntryD" enabled="True"><attrs><attr name="GLIDEIN_ResourceName" value="R2"/></attrs></entry></entries></glidein>"#,
			),
			write(
				dir.path(),
				"b.yml",
				"G:\n  R2:\n    EntryE:\n      attrs:\n        GLIDEIN_ResourceName:\n          value: R2\n",
			),
		];

		let aggregate = merge(&documents, false).expect("merge");
		assert_eq!(aggregate.index.entries("R2"), ["EntryD", "EntryE"]);

		let reversed = merge(documents.iter().rev(), false).expect("merge");
		assert_eq!(reversed.index.entries("R2"), ["EntryE", "EntryD"]);
	}

	#[test]
	fn missing_document_aborts() {
		let dir = TempDir::new().expect("temp dir");
		let documents = [FactoryDocument::new(dir.path().join("gone.xml"))];

		let err = merge(&documents, false).unwrap_err();

		assert!(matches!(err, crate::Error::FileIO(_)));
	}

	#[test]
	#[traced_test]
	fn skipped_entries_are_reported_as_warnings() {
		let dir = TempDir::new().expect("temp dir");
		let documents = [write(
			dir.path(),
			"c.yml",
			"G:\n  R:\n    broken:\n      limits: {}\n",
		)];

		let aggregate = merge(&documents, false).expect("merge");

		assert_eq!(aggregate.skipped.len(), 1);
		assert!(aggregate.index.is_empty());
		assert!(logs_contain("skipped entry 'broken'"));
	}
}
