use serde::{Deserialize, Serialize};
use trellis_blocks::Block;

use crate::container::{Container, ListContainer};

/// Text of the placeholder node rendered for an empty child list.
pub const EMPTY_PANE_TEXT: &str = "_(this pane is empty)_";

/// Display payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeContent {
	/// One markdown content unit, rendered as a single section.
	Text(String),
	/// Pre-built blocks, rendered as-is.
	Blocks(Vec<Block>),
}

impl From<&str> for NodeContent {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for NodeContent {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<Block> for NodeContent {
	fn from(block: Block) -> Self {
		Self::Blocks(vec![block])
	}
}

impl From<Vec<Block>> for NodeContent {
	fn from(blocks: Vec<Block>) -> Self {
		Self::Blocks(blocks)
	}
}

/// A node of an expandable tree.
///
/// A node shows its own content and owns zero or more containers of child nodes. A lone container
/// is placed beside the first content block by default; several containers go on their own row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
	content: NodeContent,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	containers: Vec<Container>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	side_placement: Option<bool>,
}

impl Node {
	/// Creates a leaf node.
	pub fn new(content: impl Into<NodeContent>) -> Self {
		Self {
			content: content.into(),
			containers: Vec::new(),
			side_placement: None,
		}
	}

	/// Creates a node whose children open from a single side button.
	///
	/// A `{}` in either label is replaced by the child count. Without children no container is
	/// attached.
	pub fn with_side_button(
		content: impl Into<NodeContent>,
		children: Vec<Node>,
		expand_label: impl Into<String>,
		collapse_label: impl Into<String>,
		page_size: usize,
	) -> Self {
		let node = Self::new(content);
		if children.is_empty() {
			return node;
		}
		node.with_container(
			ListContainer::new(children)
				.with_labels(expand_label, collapse_label)
				.with_page_size(page_size),
		)
	}

	/// Placeholder shown for an empty child list.
	pub fn empty_placeholder() -> Self {
		Self::new(EMPTY_PANE_TEXT)
	}

	/// Adds a container.
	#[must_use]
	pub fn with_container(mut self, container: impl Into<Container>) -> Self {
		self.containers.push(container.into());
		self
	}

	/// Replaces all containers.
	#[must_use]
	pub fn with_containers(mut self, containers: Vec<Container>) -> Self {
		self.containers = containers;
		self
	}

	/// Overrides whether the first container sits beside the first content block.
	#[must_use]
	pub fn with_side_placement(mut self, side: bool) -> Self {
		self.side_placement = Some(side);
		self
	}

	/// Display payload.
	pub fn content(&self) -> &NodeContent {
		&self.content
	}

	/// Child containers in display order.
	pub fn containers(&self) -> &[Container] {
		&self.containers
	}

	/// Whether the first container renders as an accessory of the first content block.
	pub fn side_placement(&self) -> bool {
		self.side_placement.unwrap_or(self.containers.len() == 1)
	}

	/// The node's own content blocks, without any container controls.
	pub fn content_blocks(&self) -> Vec<Block> {
		match &self.content {
			NodeContent::Text(text) if text.is_empty() => Vec::new(),
			NodeContent::Text(text) => vec![Block::section(text)],
			NodeContent::Blocks(blocks) => blocks.clone(),
		}
	}

	/// Best-effort plain text of the content, for notification fallbacks.
	pub fn plain_text(&self) -> String {
		match &self.content {
			NodeContent::Text(text) => text.clone(),
			NodeContent::Blocks(blocks) => blocks.iter().filter_map(Block::text).collect::<Vec<_>>().join("\n"),
		}
	}
}
