use std::{fmt::Display, path::Path};

use thiserror::Error;
use tracing::error;

/// Log a failure that cannot be propagated, e.g. from a `Drop` implementation
pub fn report_error(res: &Result<(), impl Display>) {
	if let Err(e) = res {
		error!("{e:#}");
	}
}

/// I/O failure on a factory document or checkout directory, keeping the offending path
#[derive(Error, Debug)]
pub struct FileIOError {
	pub path: Box<Path>,
	#[source]
	pub source: std::io::Error,
	pub context: Option<&'static str>,
}

impl Display for FileIOError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.context {
			Some(context) => write!(
				f,
				"{context}: {}; path: '{}'",
				self.source,
				self.path.display()
			),
			None => write!(
				f,
				"file I/O error: {}; path: '{}'",
				self.source,
				self.path.display()
			),
		}
	}
}

impl FileIOError {
	pub fn from_std_io_err(path: impl AsRef<Path>, source: std::io::Error) -> Self {
		Self {
			path: path.as_ref().into(),
			source,
			context: None,
		}
	}

	pub fn with_context(
		path: impl AsRef<Path>,
		source: std::io::Error,
		context: &'static str,
	) -> Self {
		Self {
			path: path.as_ref().into(),
			source,
			context: Some(context),
		}
	}
}

/// Glob patterns are built from paths, so the checkout root must be valid UTF-8
#[derive(Error, Debug)]
#[error("received a non UTF-8 path: <path='{0:?}'>")]
pub struct NonUtf8PathError(pub Box<Path>);

#[cfg(test)]
mod tests {
	use std::io;

	use super::*;

	#[test]
	fn context_replaces_generic_prefix() {
		let err = FileIOError::with_context(
			"/tmp/factory/entries.xml",
			io::Error::new(io::ErrorKind::NotFound, "gone"),
			"failed to read factory document",
		);

		assert_eq!(
			err.to_string(),
			"failed to read factory document: gone; path: '/tmp/factory/entries.xml'"
		);
	}

	#[test]
	fn generic_prefix_without_context() {
		let err = FileIOError::from_std_io_err(
			"OSG_autoconf",
			io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
		);

		assert_eq!(err.to_string(), "file I/O error: denied; path: 'OSG_autoconf'");
	}
}
