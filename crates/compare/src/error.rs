use fc_utils::error::{FileIOError, NonUtf8PathError};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to fetch topology registry <url='{url}'>: {source}")]
	FetchRegistry {
		url: String,
		#[source]
		source: reqwest::Error,
	},
	#[error("failed to spawn git to clone <repository='{url}'>: {source}")]
	SpawnGit {
		url: String,
		#[source]
		source: std::io::Error,
	},
	#[error("git clone of <repository='{url}'> exited with {status}: {stderr}")]
	CloneFailed {
		url: String,
		status: std::process::ExitStatus,
		stderr: String,
	},

	#[error("malformed topology registry document: {0}")]
	ParseRegistry(#[source] quick_xml::de::DeError),
	#[error("malformed factory XML document <path='{path}'>: {source}")]
	ParseFactoryXml {
		path: String,
		#[source]
		source: quick_xml::de::DeError,
	},
	#[error("malformed factory YAML document <path='{path}'>: {source}")]
	ParseFactoryYaml {
		path: String,
		#[source]
		source: serde_yaml::Error,
	},
	#[error("factory YAML document <path='{path}'> must be a mapping at the top level")]
	FactoryYamlNotMapping { path: String },

	#[error("invalid document pattern '{pattern}': {source}")]
	Pattern {
		pattern: String,
		#[source]
		source: glob::PatternError,
	},

	#[error(transparent)]
	FileIO(#[from] FileIOError),
	#[error(transparent)]
	NonUtf8Path(#[from] NonUtf8PathError),
}

impl Error {
	/// Registry or repository could not be reached
	pub fn is_fetch(&self) -> bool {
		matches!(
			self,
			Self::FetchRegistry { .. } | Self::SpawnGit { .. } | Self::CloneFailed { .. }
		)
	}

	/// A document was readable but its top-level structure is invalid
	pub fn is_parse(&self) -> bool {
		matches!(
			self,
			Self::ParseRegistry(_)
				| Self::ParseFactoryXml { .. }
				| Self::ParseFactoryYaml { .. }
				| Self::FactoryYamlNotMapping { .. }
		)
	}
}
