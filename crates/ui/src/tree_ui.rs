use std::sync::Arc;

use tracing::{info, warn};
use trellis_blocks::Block;
use trellis_store::{ExpiringCache, KvStore, Namespaced, RootRegistry};
use trellis_tree::container::{DEFAULT_COLLAPSE_LABEL, DEFAULT_EXPAND_LABEL};
use trellis_tree::{Node, Path, RootKey, Renderer, is_tree_token};

use crate::config::TreeUiConfig;
use crate::transport::{Response, Transport};
use crate::{Error, Result};

/// Key prefix of roots in the durable store.
pub const ROOT_NAMESPACE: &str = "tree:";

/// Options of [`TreeUi::post_node`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostOptions {
	/// Notification text; defaults to the node's plain text.
	pub alt_text: Option<String>,
	/// Post with the first container opened on its first child.
	pub expand_first: bool,
}

/// Options of [`TreeUi::post_nodes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostNodesOptions {
	/// Collect the nodes under one collapsible parent message instead of one message each.
	pub together: bool,
	/// Parent content when together, otherwise a plain message posted first.
	pub header: Option<String>,
	/// Plain message posted when there are no nodes.
	pub message_if_none: Option<String>,
	/// Open each node's first container when posting separately.
	pub expand_first_if_separate: bool,
}

/// Posts trees and answers their interactions.
pub struct TreeUi {
	registry: RootRegistry<Namespaced<Arc<dyn KvStore>>>,
	renderer: Renderer,
	transport: Arc<dyn Transport>,
	config: TreeUiConfig,
}

impl TreeUi {
	/// Creates a tree UI storing roots in `store` and talking to the host through `transport`.
	pub fn new(store: Arc<dyn KvStore>, transport: Arc<dyn Transport>, config: TreeUiConfig) -> Result<Self> {
		config.validate()?;
		let cache = ExpiringCache::new(config.cache_capacity, config.cache_ttl());
		Ok(Self {
			registry: RootRegistry::new(store.namespaced(ROOT_NAMESPACE), cache),
			renderer: Renderer::new(config.render_options()),
			transport,
			config,
		})
	}

	/// Active settings.
	pub fn config(&self) -> &TreeUiConfig {
		&self.config
	}

	/// Root registry.
	pub fn registry(&self) -> &RootRegistry<Namespaced<Arc<dyn KvStore>>> {
		&self.registry
	}

	/// Whether `action_id` belongs to a tree posted by this UI.
	pub fn handles(&self, action_id: &str) -> bool {
		is_tree_token(action_id)
	}

	/// Renders the root registered under `root_key` at `path`.
	pub fn render(&self, root_key: &RootKey, path: &Path) -> Result<Vec<Block>> {
		let root = self.registry.get(root_key)?;
		Ok(self.renderer.render(root_key, &root, path)?)
	}

	/// Registers `node` as a new root and posts it to `target`.
	pub fn post_node(&self, target: &str, node: Node, options: PostOptions) -> Result<Response> {
		let alt_text = options.alt_text.unwrap_or_else(|| node.plain_text());
		let (root_key, root) = self.registry.insert(node)?;
		let blocks = self.renderer.render_initial(&root_key, &root, options.expand_first)?;
		info!(channel = target, root_key = %root_key, blocks = blocks.len(), "posting tree");
		self.send(target, &alt_text, &blocks)
	}

	/// Posts several nodes, either under one parent or one message each.
	///
	/// Returns the responses of every message posted, headers and notices included.
	pub fn post_nodes(&self, target: &str, nodes: Vec<Node>, options: PostNodesOptions) -> Result<Vec<Response>> {
		if nodes.is_empty() {
			return match options.message_if_none {
				Some(message) => Ok(vec![self.send(target, &message, &[])?]),
				None => Ok(Vec::new()),
			};
		}

		if options.together {
			let header = options.header.unwrap_or_default();
			let first = nodes[0].plain_text();
			let alt_text = match nodes.len() {
				1 => format!("{header}: {first}"),
				n => format!("{header}: ({n}) {first}"),
			};
			let parent = Node::with_side_button(
				header,
				nodes,
				DEFAULT_EXPAND_LABEL,
				DEFAULT_COLLAPSE_LABEL,
				self.config.page_size,
			);
			let options = PostOptions {
				alt_text: Some(alt_text),
				expand_first: true,
			};
			return Ok(vec![self.post_node(target, parent, options)?]);
		}

		let mut responses = Vec::with_capacity(nodes.len() + 1);
		if let Some(header) = options.header {
			responses.push(self.send(target, &header, &[])?);
		}
		for node in nodes {
			let options = PostOptions {
				alt_text: None,
				expand_first: options.expand_first_if_separate,
			};
			responses.push(self.post_node(target, node, options)?);
		}
		Ok(responses)
	}

	pub(crate) fn transport(&self) -> &dyn Transport {
		self.transport.as_ref()
	}

	fn send(&self, target: &str, text: &str, blocks: &[Block]) -> Result<Response> {
		let response = self.transport.post(target, text, blocks);
		if !response.is_success() {
			return Err(self.fallback(target, "posting", response));
		}
		Ok(response)
	}

	/// Posts a plain notice about a rejected host call and converts it into an error.
	pub(crate) fn fallback(&self, target: &str, context: &str, response: Response) -> Error {
		let body = response.body.as_deref().unwrap_or_default();
		warn!(channel = target, status = response.status, body, context, "host rejected tree message");
		let notice = self.transport.post(target, &format!("error in tree {context} handling: {body}"), &[]);
		if !notice.is_success() {
			warn!(channel = target, status = notice.status, "failure notice was rejected too");
		}
		Error::TransportFailure {
			status: response.status,
			body: response.body,
		}
	}
}

impl std::fmt::Debug for TreeUi {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TreeUi")
			.field("registry", &self.registry)
			.field("renderer", &self.renderer)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
