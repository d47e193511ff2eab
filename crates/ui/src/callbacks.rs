//! Closures bound to individual buttons and pickers.
//!
//! Registering a callback yields an element whose action id is `rcb_` followed by a fresh UUID.
//! The closure lives in an expiring in-process cache; interactions on unknown or expired ids
//! fail with [`Error::NotFound`].

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use trellis_blocks::{Button, SelectOption, StaticSelect, TextObject};
use trellis_store::ExpiringCache;
use uuid::Uuid;

use crate::config::TreeUiConfig;
use crate::dispatch::Interaction;
use crate::{Error, Result};

/// Action id prefix of registered callbacks.
pub const CALLBACK_PREFIX: &str = "rcb_";

/// A registered interaction handler.
pub type Callback = Arc<dyn Fn(&Interaction) -> Result<()> + Send + Sync>;

/// Registry of per-element callbacks.
pub struct ActionCallbacks {
	callbacks: ExpiringCache<Callback>,
}

impl ActionCallbacks {
	/// Creates a registry keeping at most `capacity` callbacks for `ttl` each.
	pub fn new(capacity: usize, ttl: Duration) -> Self {
		Self {
			callbacks: ExpiringCache::new(capacity, ttl),
		}
	}

	/// Creates a registry sized by `config`.
	pub fn from_config(config: &TreeUiConfig) -> Self {
		Self::new(config.callback_capacity, config.callback_ttl())
	}

	/// Creates a button that runs `callback` when clicked.
	pub fn button(&self, text: impl Into<String>, callback: impl Fn(&Interaction) -> Result<()> + Send + Sync + 'static) -> Button {
		Button::new(text, self.register(Arc::new(callback)))
	}

	/// Creates a picker that runs `callback` with the chosen option.
	pub fn menu(
		&self,
		placeholder: impl Into<String>,
		options: Vec<SelectOption>,
		callback: impl Fn(&Interaction) -> Result<()> + Send + Sync + 'static,
	) -> StaticSelect {
		StaticSelect {
			placeholder: TextObject::plain(placeholder),
			action_id: self.register(Arc::new(callback)),
			options,
			initial_option: None,
		}
	}

	/// Whether `action_id` names a registered callback.
	pub fn handles(&self, action_id: &str) -> bool {
		action_id.starts_with(CALLBACK_PREFIX)
	}

	/// Runs the callback registered for the interaction's element.
	pub fn dispatch(&self, interaction: &Interaction) -> Result<()> {
		let key = interaction
			.action_id
			.strip_prefix(CALLBACK_PREFIX)
			.ok_or_else(|| Error::NotFound(interaction.action_id.clone()))?;
		let callback = self.callbacks.get(key).ok_or_else(|| Error::NotFound(interaction.action_id.clone()))?;
		debug!(action_id = %interaction.action_id, "running action callback");
		callback(interaction)
	}

	fn register(&self, callback: Callback) -> String {
		let key = Uuid::new_v4().to_string();
		let action_id = format!("{CALLBACK_PREFIX}{key}");
		self.callbacks.insert(key, callback);
		action_id
	}
}

impl std::fmt::Debug for ActionCallbacks {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ActionCallbacks").field("callbacks", &self.callbacks).finish()
	}
}
