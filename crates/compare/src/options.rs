use std::path::PathBuf;

pub const DEFAULT_REGISTRY_URL: &str = "https://topology.opensciencegrid.org/rgsummary/xml?active=on&active_value=1&service=on&service_1=on";
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/opensciencegrid/osg-gfactory";
pub const DEFAULT_YAML_DIR: &str = "OSG_autoconf";

/// Where the factory configuration documents come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySource {
	/// Cloned into a temporary directory that is removed once the run ends
	Remote(String),
	/// An existing checkout, left untouched
	Local(PathBuf),
}

/// Everything a comparison run needs to know.
///
/// The two dump toggles only add diagnostics to the log, they never change
/// the report.
#[derive(Debug, Clone)]
pub struct Options {
	pub registry_url: String,
	pub repository: RepositorySource,
	/// Parent of the temporary clone; the system temp directory when unset
	pub work_dir: Option<PathBuf>,
	/// Directory below the checkout root holding the `*.yml` factory documents
	pub yaml_dir: PathBuf,
	/// Log every registry name in tree form while parsing
	pub tree_dump: bool,
	/// Log every `GLIDEIN_ResourceName` extracted from the factory documents
	pub factory_dump: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			registry_url: DEFAULT_REGISTRY_URL.to_string(),
			repository: RepositorySource::Remote(DEFAULT_REPOSITORY_URL.to_string()),
			work_dir: None,
			yaml_dir: PathBuf::from(DEFAULT_YAML_DIR),
			tree_dump: false,
			factory_dump: false,
		}
	}
}
