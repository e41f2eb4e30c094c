//! Acquiring the factory repository and finding its configuration documents.

use std::{
	fs, io,
	path::{Path, PathBuf},
	process::Command,
};

use fc_utils::error::{report_error, FileIOError, NonUtf8PathError};
use glob::{glob_with, MatchOptions, Pattern};
use tempfile::TempDir;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{factory::FactoryDocument, Error, Result};

/// A factory repository on disk.
///
/// Cloned checkouts live in a temporary directory that is removed when the
/// checkout is dropped, whether the run succeeded or not.
#[derive(Debug)]
pub struct Checkout {
	root: PathBuf,
	temp_dir: Option<TempDir>,
}

impl Checkout {
	/// Shallow clone `url` into a fresh temporary directory.
	pub fn clone_repository(url: &str) -> Result<Self> {
		Self::clone_repository_in(url, &std::env::temp_dir())
	}

	/// Shallow clone `url` into a fresh temporary directory below `parent`.
	pub fn clone_repository_in(url: &str, parent: &Path) -> Result<Self> {
		let temp_dir = tempfile::Builder::new()
			.prefix("gfactory-")
			.tempdir_in(parent)
			.map_err(|e| {
				FileIOError::with_context(parent, e, "failed to create checkout directory")
			})?;

		debug!(%url, path = %temp_dir.path().display(), "Cloning factory repository");

		let output = Command::new("git")
			.args(["clone", "--quiet", "--depth", "1", url])
			.arg(temp_dir.path())
			.output()
			.map_err(|source| Error::SpawnGit {
				url: url.to_string(),
				source,
			})?;

		// Built before checking the status so a failed clone is cleaned up too
		let checkout = Self::from_temp_dir(temp_dir);

		if !output.status.success() {
			return Err(Error::CloneFailed {
				url: url.to_string(),
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}

		Ok(checkout)
	}

	/// Use an existing directory; it is left in place on drop.
	pub fn local(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			temp_dir: None,
		}
	}

	pub(crate) fn from_temp_dir(temp_dir: TempDir) -> Self {
		Self {
			root: temp_dir.path().to_path_buf(),
			temp_dir: Some(temp_dir),
		}
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn is_temporary(&self) -> bool {
		self.temp_dir.is_some()
	}

	pub fn discover(&self, yaml_dir: &Path) -> Result<Vec<FactoryDocument>> {
		discover_documents(&self.root, yaml_dir)
	}
}

impl Drop for Checkout {
	fn drop(&mut self) {
		let Some(temp_dir) = self.temp_dir.take() else {
			return;
		};

		let path = temp_dir.path().to_path_buf();

		// git marks its object files read-only, which some filesystems refuse to unlink
		if let Err(e) = temp_dir.close() {
			warn!(
				path = %path.display(),
				%e,
				"Failed to remove checkout, retrying with write permission"
			);
			report_error(&force_remove_dir(&path));
		} else {
			debug!(path = %path.display(), "Removed checkout");
		}
	}
}

fn force_remove_dir(path: &Path) -> std::result::Result<(), FileIOError> {
	for entry in WalkDir::new(path).into_iter().filter_map(|entry| entry.ok()) {
		let entry_path = entry.path();
		let metadata = entry
			.metadata()
			.map_err(|e| FileIOError::from_std_io_err(entry_path, io::Error::from(e)))?;

		let mut permissions = metadata.permissions();
		grant_owner_write(&mut permissions, metadata.is_dir());

		fs::set_permissions(entry_path, permissions).map_err(|e| {
			FileIOError::with_context(entry_path, e, "failed to make checkout entry writable")
		})?;
	}

	match fs::remove_dir_all(path) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
		Err(e) => Err(FileIOError::with_context(path, e, "failed to remove checkout")),
	}
}

#[cfg(unix)]
fn grant_owner_write(permissions: &mut fs::Permissions, is_dir: bool) {
	use std::os::unix::fs::PermissionsExt;

	let extra = if is_dir { 0o700 } else { 0o200 };
	permissions.set_mode(permissions.mode() | extra);
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn grant_owner_write(permissions: &mut fs::Permissions, _is_dir: bool) {
	permissions.set_readonly(false);
}

/// Top-level `*.xml` documents followed by the `*.yml` documents in `yaml_dir`.
///
/// Each group is in lexical order; hidden files are ignored.
pub fn discover_documents(root: &Path, yaml_dir: &Path) -> Result<Vec<FactoryDocument>> {
	let options = MatchOptions {
		require_literal_leading_dot: true,
		..MatchOptions::new()
	};

	let mut documents = Vec::new();

	for (dir, extension) in [(root.to_path_buf(), "xml"), (root.join(yaml_dir), "yml")] {
		let dir_str = dir
			.to_str()
			.ok_or_else(|| NonUtf8PathError(dir.clone().into_boxed_path()))?;
		let pattern = format!("{}/*.{extension}", Pattern::escape(dir_str));

		let paths = glob_with(&pattern, options).map_err(|source| Error::Pattern {
			pattern: pattern.clone(),
			source,
		})?;

		for path in paths {
			let path = path.map_err(|e| {
				let path = e.path().to_path_buf();
				FileIOError::with_context(path, e.into(), "failed to read checkout directory")
			})?;

			if path.is_file() {
				documents.push(FactoryDocument::new(path));
			}
		}
	}

	debug!(root = %root.display(), documents = documents.len(), "Discovered factory documents");

	Ok(documents)
}
