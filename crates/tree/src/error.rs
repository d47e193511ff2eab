use crate::path::Path;

/// A convenient type alias for `Result` with `E` = [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while addressing or rendering a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// A serialized path contains a segment that is not an integer.
	#[error("malformed path {input:?}: segment {segment:?} is not an integer")]
	MalformedPath {
		/// The whole serialized path.
		input: String,
		/// The offending segment.
		segment: String,
	},
	/// A callback token could not be decoded.
	#[error("invalid callback token {token:?}: {defect}")]
	InvalidToken {
		/// The token as received.
		token: String,
		/// What is wrong with it.
		defect: TokenDefect,
	},
	/// A root key contains the reserved token separator.
	#[error("root key {0:?} contains the reserved token separator")]
	InvalidRootKey(String),
	/// A path no longer matches the tree it addresses.
	#[error("path {path} no longer matches the tree: {shape}")]
	StaleShape {
		/// Path to the level where the mismatch was found.
		path: Path,
		/// Which index went stale.
		shape: StaleShape,
	},
}

/// Why a callback token failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenDefect {
	/// The token does not start with the tree prefix.
	#[error("missing tree prefix")]
	MissingPrefix,
	/// The token has no root key / path separator.
	#[error("missing separator")]
	MissingSeparator,
	/// The path part failed to parse.
	#[error("segment {0:?} is not an integer")]
	MalformedPath(String),
}

/// An index in a path that points past the current tree shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaleShape {
	/// A sibling index outside the sibling list.
	#[error("sibling {index} of {len}")]
	Sibling {
		/// Index found in the path.
		index: i64,
		/// Current sibling count.
		len: usize,
	},
	/// A container index outside the node's containers.
	#[error("container {index} of {count}")]
	Container {
		/// Index found in the path.
		index: i64,
		/// Current container count.
		count: usize,
	},
	/// An option index outside a multi-list container's options.
	#[error("option {index:?} of {count}")]
	Choice {
		/// Index found in the path, if any.
		index: Option<i64>,
		/// Current option count.
		count: usize,
	},
	/// The path continues below a node that has no containers.
	#[error("node has no containers")]
	NoContainers,
}
