//! Interaction handling.
//!
//! An interaction is answered in four steps: the callback token is decoded, the picked value is
//! folded into the path, the tree is re-rendered at that path and the original message is
//! replaced with the result. Each step is a [`Phase`]; a failure is logged with the phase it
//! happened in.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};
use trellis_blocks::Block;
use trellis_tree::{Path, SENTINEL, decode};

use crate::transport::MessageHandle;
use crate::tree_ui::TreeUi;
use crate::{Error, Result};

/// A user interaction reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
	/// Action id of the element that was used.
	pub action_id: String,
	/// Value of the picked option; absent for button clicks.
	#[serde(default)]
	pub selected_value: Option<String>,
	/// Message holding the element.
	pub message: MessageHandle,
}

impl Interaction {
	/// A button click.
	pub fn click(action_id: impl Into<String>, message: MessageHandle) -> Self {
		Self {
			action_id: action_id.into(),
			selected_value: None,
			message,
		}
	}

	/// A picker selection.
	pub fn select(action_id: impl Into<String>, value: impl Into<String>, message: MessageHandle) -> Self {
		Self {
			action_id: action_id.into(),
			selected_value: Some(value.into()),
			message,
		}
	}
}

/// Steps of answering an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Nothing started.
	Idle,
	/// Decoding the callback token.
	Decoding,
	/// Folding the selection into the path.
	Resolving,
	/// Loading the root and rendering it.
	Rendering,
	/// Replacing the message.
	Replying,
}

/// Folds a picked option value into `path`.
///
/// The sentinel collapses (drops the last index); option `i` expands it (appends `[i, 0]`).
pub fn resolve_selection(path: &Path, value: &str) -> Result<Path> {
	match value.trim().parse::<i64>() {
		Ok(SENTINEL) => Ok(path.truncate_last()),
		Ok(index) if index >= 0 => Ok(path.extend([index, 0])),
		_ => Err(Error::InvalidSelection(value.to_string())),
	}
}

impl TreeUi {
	/// Answers a tree interaction by replacing its message with the re-rendered tree.
	///
	/// Returns the new blocks. If the host rejects the replacement, one plain notice is posted
	/// to the message's channel and [`Error::TransportFailure`] is returned.
	pub fn dispatch(&self, interaction: &Interaction) -> Result<Vec<Block>> {
		let span = debug_span!("tree_dispatch", action_id = %interaction.action_id);
		let _guard = span.enter();

		let mut phase = Phase::Idle;
		let result = self.answer(interaction, &mut phase);
		if let Err(error) = &result {
			warn!(?phase, %error, "tree interaction failed");
		}
		result
	}

	fn answer(&self, interaction: &Interaction, phase: &mut Phase) -> Result<Vec<Block>> {
		advance(phase, Phase::Decoding);
		let (root_key, path) = decode(&interaction.action_id)?;

		advance(phase, Phase::Resolving);
		let path = match &interaction.selected_value {
			Some(value) => resolve_selection(&path, value)?,
			None => path,
		};

		advance(phase, Phase::Rendering);
		let blocks = self.render(&root_key, &path)?;

		advance(phase, Phase::Replying);
		let response = self.transport().replace(&interaction.message, &blocks);
		if !response.is_success() {
			return Err(self.fallback(&interaction.message.channel, "interaction", response));
		}
		Ok(blocks)
	}
}

fn advance(phase: &mut Phase, next: Phase) {
	debug!(from = ?*phase, to = ?next, "dispatch phase");
	*phase = next;
}
