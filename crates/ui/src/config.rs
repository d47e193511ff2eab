//! Tree UI settings.
//!
//! ```toml
//! block_ceiling = 50
//! page_size = 10
//! cache_ttl_secs = 120
//! cache_capacity = 20
//! stale_paths = "reset"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use trellis_store::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use trellis_tree::container::DEFAULT_PAGE_SIZE;
use trellis_tree::render::DEFAULT_BLOCK_CEILING;
use trellis_tree::{RenderOptions, StalePolicy};

/// Errors raised while loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The settings file could not be read.
	#[error("I/O error reading {}: {error}", path.display())]
	Io {
		/// Path of the file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
	/// The settings are not valid TOML for this schema.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
	/// A value is out of range.
	#[error("invalid {field}: {reason}")]
	Invalid {
		/// Offending field.
		field: &'static str,
		/// What is wrong with it.
		reason: &'static str,
	},
}

/// Settings of a [`TreeUi`](crate::TreeUi) and its [`ActionCallbacks`](crate::ActionCallbacks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeUiConfig {
	/// Maximum number of blocks per rendered message.
	pub block_ceiling: usize,
	/// Page size of the parent node created when posting several nodes together.
	pub page_size: usize,
	/// Seconds a root stays in the fast cache.
	pub cache_ttl_secs: u64,
	/// Number of roots kept in the fast cache.
	pub cache_capacity: usize,
	/// Handling of paths that no longer fit their tree.
	pub stale_paths: StalePolicy,
	/// Number of registered action callbacks kept.
	pub callback_capacity: usize,
	/// Seconds an action callback stays registered.
	pub callback_ttl_secs: u64,
}

impl Default for TreeUiConfig {
	fn default() -> Self {
		Self {
			block_ceiling: DEFAULT_BLOCK_CEILING,
			page_size: DEFAULT_PAGE_SIZE,
			cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
			cache_capacity: DEFAULT_CACHE_CAPACITY,
			stale_paths: StalePolicy::Reset,
			callback_capacity: 1000,
			callback_ttl_secs: 24 * 60 * 60,
		}
	}
}

impl TreeUiConfig {
	/// Parses and validates settings from TOML. Missing fields take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a settings file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	/// Checks value ranges.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
		if self.block_ceiling < 2 {
			return invalid("block_ceiling", "must leave room for content and the repagination notice (at least 2)");
		}
		if self.page_size == 0 {
			return invalid("page_size", "must be at least 1");
		}
		if self.cache_capacity == 0 {
			return invalid("cache_capacity", "must be at least 1");
		}
		if self.callback_capacity == 0 {
			return invalid("callback_capacity", "must be at least 1");
		}
		Ok(())
	}

	/// Renderer settings.
	pub fn render_options(&self) -> RenderOptions {
		RenderOptions {
			ceiling: self.block_ceiling,
			stale: self.stale_paths,
		}
	}

	/// Fast cache entry lifetime.
	pub fn cache_ttl(&self) -> Duration {
		Duration::from_secs(self.cache_ttl_secs)
	}

	/// Action callback lifetime.
	pub fn callback_ttl(&self) -> Duration {
		Duration::from_secs(self.callback_ttl_secs)
	}
}
