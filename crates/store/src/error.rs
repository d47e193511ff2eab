use std::io;
use std::path::PathBuf;

/// A convenient type alias for `Result` with `E` = [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Store errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// Filesystem access failed.
	#[error("I/O error at {}: {source}", path.display())]
	Io {
		/// File or directory involved.
		path: PathBuf,
		/// Underlying error.
		#[source]
		source: io::Error,
	},
	/// A value could not be encoded or decoded.
	#[error("JSON codec error: {0}")]
	Json(#[from] serde_json::Error),
	/// Nothing is stored under the key.
	#[error("no value stored under {0:?}")]
	NotFound(String),
}

impl Error {
	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}
