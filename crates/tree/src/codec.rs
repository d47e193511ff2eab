//! Callback token codec.
//!
//! Wire format: `tn@<root key>^<path>`, e.g. `tn@5f0c…^0,0,3`. The root key may not contain the
//! separator, and decoding splits on the separator's last occurrence.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result, TokenDefect};
use crate::path::Path;

/// Prefix marking an action id as a tree callback token.
pub const TOKEN_PREFIX: &str = "tn@";

/// Separator between the root key and the serialized path.
pub const SEPARATOR: char = '^';

/// Opaque identifier under which a whole tree is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootKey(String);

impl RootKey {
	/// Generates a fresh random key (hyphenated UUID v4).
	pub fn generate() -> Self {
		Self(Uuid::new_v4().to_string())
	}

	/// Wraps an existing key, rejecting keys that contain [`SEPARATOR`].
	pub fn new(key: impl Into<String>) -> Result<Self> {
		let key = key.into();
		if key.contains(SEPARATOR) {
			return Err(Error::InvalidRootKey(key));
		}
		Ok(Self(key))
	}

	/// The key as a string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for RootKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for RootKey {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl TryFrom<String> for RootKey {
	type Error = Error;

	fn try_from(key: String) -> Result<Self> {
		Self::new(key)
	}
}

impl From<RootKey> for String {
	fn from(key: RootKey) -> Self {
		key.0
	}
}

/// Encodes `(root_key, path)` into a callback token.
pub fn encode(root_key: &RootKey, path: &Path) -> String {
	format!("{TOKEN_PREFIX}{root_key}{SEPARATOR}{path}")
}

/// Decodes a callback token back into `(root_key, path)`.
pub fn decode(token: &str) -> Result<(RootKey, Path)> {
	let invalid = |defect| Error::InvalidToken {
		token: token.to_string(),
		defect,
	};
	let body = token.strip_prefix(TOKEN_PREFIX).ok_or_else(|| invalid(TokenDefect::MissingPrefix))?;
	let (key, serialized) = body.rsplit_once(SEPARATOR).ok_or_else(|| invalid(TokenDefect::MissingSeparator))?;
	let path = serialized.parse::<Path>().map_err(|e| match e {
		Error::MalformedPath { segment, .. } => invalid(TokenDefect::MalformedPath(segment)),
		other => other,
	})?;
	Ok((RootKey(key.to_string()), path))
}

/// Whether an action id carries a tree callback token.
pub fn is_tree_token(action_id: &str) -> bool {
	action_id.starts_with(TOKEN_PREFIX)
}
