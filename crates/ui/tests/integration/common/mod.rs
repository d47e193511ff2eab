//! Common utilities for tree UI integration tests.

use std::sync::Arc;

use parking_lot::Mutex;
use trellis_blocks::{Block, Element};
use trellis_store::{KvStore, MemoryStore};
use trellis_ui::{Interaction, MessageHandle, Response, Transport, TreeUi, TreeUiConfig};

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Post { target: String, text: String, blocks: Vec<Block> },
	Replace { message: MessageHandle, blocks: Vec<Block> },
}

/// Transport that records every call and answers with canned responses.
#[derive(Debug, Default)]
pub struct RecordingTransport {
	calls: Mutex<Vec<Call>>,
	reject_replace: Mutex<Option<Response>>,
	reject_block_posts: Mutex<Option<Response>>,
	reject_notices: Mutex<Option<Response>>,
}

impl RecordingTransport {
	/// Every call so far, in order.
	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().clone()
	}

	/// Plain-text posts (no blocks) so far.
	pub fn notices(&self) -> Vec<String> {
		self.calls
			.lock()
			.iter()
			.filter_map(|call| match call {
				Call::Post { text, blocks, .. } if blocks.is_empty() => Some(text.clone()),
				_ => None,
			})
			.collect()
	}

	/// Answers every replacement with `response`.
	pub fn reject_replace(&self, response: Response) {
		*self.reject_replace.lock() = Some(response);
	}

	/// Answers every post carrying blocks with `response`.
	pub fn reject_block_posts(&self, response: Response) {
		*self.reject_block_posts.lock() = Some(response);
	}

	/// Answers every post, plain notices included, with `response`.
	pub fn reject_all_posts(&self, response: Response) {
		*self.reject_block_posts.lock() = Some(response.clone());
		*self.reject_notices.lock() = Some(response);
	}
}

impl Transport for RecordingTransport {
	fn post(&self, target: &str, text: &str, blocks: &[Block]) -> Response {
		let mut calls = self.calls.lock();
		calls.push(Call::Post {
			target: target.to_string(),
			text: text.to_string(),
			blocks: blocks.to_vec(),
		});
		let rejection = if blocks.is_empty() {
			self.reject_notices.lock().clone()
		} else {
			self.reject_block_posts.lock().clone()
		};
		if let Some(rejection) = rejection {
			return rejection;
		}
		Response::ok(MessageHandle {
			channel: target.to_string(),
			ts: format!("{}.0", calls.len()),
		})
	}

	fn replace(&self, message: &MessageHandle, blocks: &[Block]) -> Response {
		self.calls.lock().push(Call::Replace {
			message: message.clone(),
			blocks: blocks.to_vec(),
		});
		match self.reject_replace.lock().clone() {
			Some(rejection) => rejection,
			None => Response::ok(message.clone()),
		}
	}
}

/// A tree UI over a fresh memory store and recording transport.
pub struct Harness {
	pub ui: TreeUi,
	pub transport: Arc<RecordingTransport>,
	pub store: Arc<MemoryStore>,
}

impl Harness {
	pub fn new(config: TreeUiConfig) -> Self {
		let _ = tracing_subscriber::fmt().with_test_writer().try_init();
		let transport = Arc::new(RecordingTransport::default());
		let store = Arc::new(MemoryStore::new());
		let ui = TreeUi::new(
			Arc::clone(&store) as Arc<dyn KvStore>,
			Arc::clone(&transport) as Arc<dyn Transport>,
			config,
		)
		.unwrap();
		Self { ui, transport, store }
	}

	/// Blocks of the most recent post or replacement.
	pub fn last_blocks(&self) -> Vec<Block> {
		match self.transport.calls().last() {
			Some(Call::Post { blocks, .. } | Call::Replace { blocks, .. }) => blocks.clone(),
			None => panic!("nothing was sent"),
		}
	}

	/// Clicks `element` inside the message `message`.
	pub fn click(&self, message: &MessageHandle, element: &Element) -> Vec<Block> {
		self.ui.dispatch(&Interaction::click(element.action_id(), message.clone())).unwrap()
	}

	/// Picks `value` in `element` inside the message `message`.
	pub fn pick(&self, message: &MessageHandle, element: &Element, value: &str) -> Vec<Block> {
		self.ui
			.dispatch(&Interaction::select(element.action_id(), value, message.clone()))
			.unwrap()
	}
}

impl Default for Harness {
	fn default() -> Self {
		Self::new(TreeUiConfig::default())
	}
}

/// First interactive element whose label (or first option label) is `label`.
pub fn element<'b>(blocks: &'b [Block], label: &str) -> &'b Element {
	blocks
		.iter()
		.flat_map(Block::interactive)
		.find(|element| element.label() == Some(label) || element.options().first().is_some_and(|o| o.label() == label))
		.unwrap_or_else(|| panic!("no element labelled {label:?} in {blocks:#?}"))
}

/// Text of every text-bearing block.
pub fn texts(blocks: &[Block]) -> Vec<String> {
	blocks.iter().filter_map(Block::text).map(str::to_string).collect()
}

/// Leaf nodes labelled `{prefix} {i}`.
pub fn leaves(prefix: &str, n: usize) -> Vec<trellis_tree::Node> {
	(0..n).map(|i| trellis_tree::Node::new(format!("{prefix} {i}"))).collect()
}
