//! Glidein factory configuration vs. OSG topology comparison.
//!
//! Factory entries point at registry resources through their
//! `GLIDEIN_ResourceName` attribute. This crate finds the entries whose name
//! is a registry group, site or facility instead of a resource, and the
//! entries whose name the registry doesn't know at all.
//!
//! # Overview
//!
//! 1. **Registry**: fetch the rgsummary XML and index its names by category
//! 2. **Source**: clone the factory repository into a scoped checkout
//! 3. **Factory**: parse each XML / YAML document into a resource name index
//! 4. **Aggregate**: merge the per-document indexes
//! 5. **Reconcile**: compute mismatches and orphans
//! 6. **Report**: render both lists as text
//!
//! # Example
//!
//! ```no_run
//! use fc_compare::{run, Options};
//!
//! let report = run(&Options::default())?;
//! print!("{}", report.render());
//! # Ok::<(), fc_compare::Error>(())
//! ```

pub mod aggregate;
pub mod factory;
pub mod reconcile;
pub mod registry;
pub mod report;
pub mod source;

mod error;
mod options;

pub use error::{Error, Result};
pub use factory::{FactoryDocument, FactoryIndex};
pub use options::{
	Options, RepositorySource, DEFAULT_REGISTRY_URL, DEFAULT_REPOSITORY_URL, DEFAULT_YAML_DIR,
};
pub use reconcile::{reconcile, MismatchRecord, Reconciliation};
pub use registry::{RegistryCategory, RegistryIndex};
pub use source::Checkout;

use tracing::{debug, info};

/// Outcome of one comparison run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
	pub reconciliation: Reconciliation,
	pub document_count: usize,
	/// Malformed factory records left out of the comparison
	pub skipped_entries: usize,
}

impl Report {
	pub fn mismatches(&self) -> &[MismatchRecord] {
		&self.reconciliation.mismatches
	}

	pub fn orphans(&self) -> &[String] {
		&self.reconciliation.orphans
	}

	pub fn render(&self) -> String {
		report::render(self.mismatches(), self.orphans())
	}
}

/// Fetch the registry, acquire the factory repository and compare the two.
///
/// A temporary checkout is removed before this returns, on success and on
/// error alike.
pub fn run(options: &Options) -> Result<Report> {
	let registry = registry::load_registry(&options.registry_url, options.tree_dump)?;

	compare_repository(&registry, options)
}

/// Acquire the configured factory repository and compare it against `registry`.
pub fn compare_repository(registry: &RegistryIndex, options: &Options) -> Result<Report> {
	let checkout = match (&options.repository, &options.work_dir) {
		(RepositorySource::Remote(url), Some(work_dir)) => {
			Checkout::clone_repository_in(url, work_dir)?
		}
		(RepositorySource::Remote(url), None) => Checkout::clone_repository(url)?,
		(RepositorySource::Local(path), _) => Checkout::local(path.clone()),
	};

	compare_checkout(&checkout, registry, options)
}

/// Compare every factory document of `checkout` against an already loaded registry.
pub fn compare_checkout(
	checkout: &Checkout,
	registry: &RegistryIndex,
	options: &Options,
) -> Result<Report> {
	let documents = checkout.discover(&options.yaml_dir)?;

	if options.factory_dump {
		info!("All the GLIDEIN_ResourceNames in factory:");
	}

	let aggregate = aggregate::merge(&documents, options.factory_dump)?;
	let reconciliation = reconcile(&aggregate.index, registry);

	for mismatch in &reconciliation.mismatches {
		debug!(
			entry = %mismatch.entry,
			name = %mismatch.name,
			category = %mismatch.category,
			"Factory entry names a non-resource registry entity"
		);
	}

	debug!(
		mismatches = reconciliation.mismatches.len(),
		orphans = reconciliation.orphans.len(),
		"Compared factory against topology"
	);

	Ok(Report {
		reconciliation,
		document_count: documents.len(),
		skipped_entries: aggregate.skipped.len(),
	})
}
