use crate::config::ConfigError;

/// A convenient type alias for `Result` with `E` = [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced while posting trees or handling interactions.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// Token decoding, path parsing or a rejected stale path.
	#[error(transparent)]
	Tree(#[from] trellis_tree::Error),
	/// The durable store failed.
	#[error(transparent)]
	Store(trellis_store::Error),
	/// No tree or callback is registered under the key.
	#[error("nothing registered under {0:?}")]
	NotFound(String),
	/// A picker reported a value that is not an integer index.
	#[error("selection value {0:?} is not a valid option index")]
	InvalidSelection(String),
	/// The host rejected a post or replacement.
	#[error("transport failed with status {status}: {}", body.as_deref().unwrap_or("<no body>"))]
	TransportFailure {
		/// Status reported by the host.
		status: u16,
		/// Response body, if any.
		body: Option<String>,
	},
	/// Invalid settings.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl From<trellis_store::Error> for Error {
	fn from(error: trellis_store::Error) -> Self {
		match error {
			trellis_store::Error::NotFound(key) => Self::NotFound(key),
			other => Self::Store(other),
		}
	}
}
