//! Flattening of a node tree into a bounded list of message blocks.
//!
//! An expand [`Path`] says which node is expanded at every depth. Each level shows a window of
//! its sibling list around the addressed node, followed by navigation buttons when siblings
//! fall outside the window. When the flattened output exceeds the block ceiling, the whole tree
//! is re-flattened with every page shrunk by one more entry until it fits.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trellis_blocks::limits::MAX_BLOCKS_PER_MESSAGE;
use trellis_blocks::{Block, Button, Element};

use crate::codec::{RootKey, encode};
use crate::container::Container;
use crate::error::{Error, Result, StaleShape};
use crate::node::Node;
use crate::path::{Path, SENTINEL};

/// Default block ceiling of one rendering.
pub const DEFAULT_BLOCK_CEILING: usize = MAX_BLOCKS_PER_MESSAGE;

/// Context notice appended after overflow correction.
pub const REPAGINATED_NOTICE: &str = "(blocks were repaginated to avoid exceeding the block limit)";

/// Label of the previous-page button.
pub const PREV_LABEL: &str = ":arrow_left:";

/// Label of the next-page button.
pub const NEXT_LABEL: &str = ":arrow_right:";

/// What to do when a path no longer fits the tree it addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StalePolicy {
	/// Recover locally: fall back to the first valid index and keep rendering.
	#[default]
	Reset,
	/// Fail with [`Error::StaleShape`].
	Reject,
}

/// Renderer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
	/// Maximum number of blocks in one rendering, notice included.
	pub ceiling: usize,
	/// Stale path handling.
	pub stale: StalePolicy,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			ceiling: DEFAULT_BLOCK_CEILING,
			stale: StalePolicy::default(),
		}
	}
}

/// Renders whole trees, applying overflow correction.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
	options: RenderOptions,
}

impl Renderer {
	/// Creates a renderer. A ceiling below 2 is raised to 2 so the notice always fits.
	pub fn new(options: RenderOptions) -> Self {
		Self {
			options: RenderOptions {
				ceiling: options.ceiling.max(2),
				..options
			},
		}
	}

	/// Active settings.
	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Renders `root` expanded along `path`.
	///
	/// The root sits alone in a level of page size 1, so `path` always starts with `0`.
	pub fn render(&self, root_key: &RootKey, root: &Node, path: &Path) -> Result<Vec<Block>> {
		let siblings = std::slice::from_ref(root);
		let mut shrink = 0;
		let mut flat = flatten(root_key, siblings, path, 1, shrink, self.options.stale)?;
		for (at, shape) in &flat.resets {
			warn!(root_key = %root_key, path = %path, at = %at, %shape, "stale path reset");
		}

		let ceiling = self.options.ceiling;
		if flat.blocks.len() <= ceiling {
			return Ok(flat.blocks);
		}

		let limit = ceiling - 1;
		while flat.blocks.len() > limit && shrink + 1 < flat.widest_page {
			shrink += 1;
			flat = flatten(root_key, siblings, path, 1, shrink, self.options.stale)?;
		}
		debug!(root_key = %root_key, shrink, blocks = flat.blocks.len(), "repaginated");

		let mut blocks = flat.blocks;
		if blocks.len() > limit {
			warn!(root_key = %root_key, path = %path, blocks = blocks.len(), limit, "minimal pagination still overflows, truncating");
			blocks.truncate(limit);
		}
		blocks.push(Block::context(REPAGINATED_NOTICE));
		Ok(blocks)
	}

	/// Renders `root` for its first posting.
	pub fn render_initial(&self, root_key: &RootKey, root: &Node, expand_first: bool) -> Result<Vec<Block>> {
		self.render(root_key, root, &initial_path(root, expand_first))
	}
}

/// Path of a freshly posted tree: just the root, or the root with its first container opened on
/// its first child.
pub fn initial_path(root: &Node, expand_first: bool) -> Path {
	match root.containers().first() {
		Some(container) if expand_first && container.is_multi_list() => Path::from([0, 0, 0, 0]),
		Some(_) if expand_first => Path::from([0, 0, 0]),
		_ => Path::from([0]),
	}
}

/// Page window of `len` entries of size `page` that contains `target`.
pub fn window(target: usize, page: usize, len: usize) -> Range<usize> {
	let page = page.max(1);
	let start = target - target % page;
	start.min(len)..(start + page).min(len)
}

/// Output of one flattening pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
	/// Flattened blocks.
	pub blocks: Vec<Block>,
	/// Largest nominal page size among the visited levels.
	pub widest_page: usize,
	/// Stale indexes recovered under [`StalePolicy::Reset`], with the path of their level.
	pub resets: Vec<(Path, StaleShape)>,
}

/// Flattens one sibling level and everything expanded below it.
///
/// Pure function of its inputs; every page at every level is reduced by `shrink` entries, never
/// below 1.
pub fn flatten(
	root_key: &RootKey,
	siblings: &[Node],
	path: &Path,
	page_size: usize,
	shrink: usize,
	stale: StalePolicy,
) -> Result<Flattened> {
	let mut flattener = Flattener {
		root_key,
		shrink,
		stale,
		out: Flattened::default(),
	};
	flattener.level(siblings, path, &Path::new(), page_size)?;
	Ok(flattener.out)
}

/// The container expanded below a node, and where the recursion continues.
struct Expansion<'t> {
	container: usize,
	selected: i64,
	list: &'t [Node],
	ancestor: Path,
	rest: Path,
	page_size: usize,
}

struct Flattener<'k> {
	root_key: &'k RootKey,
	shrink: usize,
	stale: StalePolicy,
	out: Flattened,
}

impl Flattener<'_> {
	fn level(&mut self, siblings: &[Node], path: &Path, ancestor: &Path, page_size: usize) -> Result<()> {
		self.out.widest_page = self.out.widest_page.max(page_size);
		if siblings.is_empty() {
			// Only the plain expand token `[.., 0]` addresses an empty list.
			if let Some(index) = path.head()
				&& (index != 0 || path.len() > 1)
			{
				self.stale(ancestor, StaleShape::Sibling { index, len: 0 })?;
			}
			let placeholder = Node::empty_placeholder();
			self.out.blocks.extend(placeholder.content_blocks());
			return Ok(());
		}

		let page = page_size.saturating_sub(self.shrink).max(1);
		let (target, rest) = self.resolve_target(siblings.len(), path, ancestor)?;
		let range = window(target, page, siblings.len());

		for (index, sibling) in (range.start..).zip(&siblings[range.start..target]) {
			self.node(sibling, &ancestor.append(index as i64), None);
		}

		let here = ancestor.append(target as i64);
		let node = &siblings[target];
		match self.resolve_expansion(node, &rest, &here)? {
			Some(expansion) => {
				self.node(node, &here, Some((expansion.container, expansion.selected)));
				self.level(expansion.list, &expansion.rest, &expansion.ancestor, expansion.page_size)?;
			}
			None => self.node(node, &here, None),
		}

		for (index, sibling) in (target + 1..).zip(&siblings[target + 1..range.end]) {
			self.node(sibling, &ancestor.append(index as i64), None);
		}

		self.navigation(ancestor, range, page, siblings.len());
		Ok(())
	}

	fn resolve_target(&mut self, len: usize, path: &Path, ancestor: &Path) -> Result<(usize, Path)> {
		let Some(head) = path.head() else {
			return Ok((0, Path::new()));
		};
		match usize::try_from(head) {
			Ok(target) if target < len => Ok((target, path.tail())),
			_ => {
				self.stale(ancestor, StaleShape::Sibling { index: head, len })?;
				Ok((0, Path::new()))
			}
		}
	}

	fn resolve_expansion<'t>(&mut self, node: &'t Node, rest: &Path, here: &Path) -> Result<Option<Expansion<'t>>> {
		if rest.is_empty() {
			return Ok(None);
		}
		let containers = node.containers();
		if containers.is_empty() {
			self.stale(here, StaleShape::NoContainers)?;
			return Ok(None);
		}

		let mut rest = if rest.len() == 1 { Path::from([0]).extend(rest) } else { rest.clone() };
		let index = rest.head().unwrap_or(0);
		let container = match usize::try_from(index).ok().filter(|&c| c < containers.len()) {
			Some(c) => c,
			None => {
				self.stale(
					here,
					StaleShape::Container {
						index,
						count: containers.len(),
					},
				)?;
				rest = Path::from([0, 0]);
				0
			}
		};

		let at = here.append(container as i64);
		let found = &containers[container];
		if !found.is_multi_list() {
			let list = found.list(0).unwrap_or_default();
			return Ok(Some(Expansion {
				container,
				selected: 0,
				list,
				ancestor: at,
				rest: rest.slice(1..),
				page_size: found.page_size(),
			}));
		}

		let (option, list) = match self.resolve_option(found, rest.get(1), &at)? {
			Some(resolved) => resolved,
			None => return Ok(None),
		};
		Ok(Some(Expansion {
			container,
			selected: option as i64,
			list,
			ancestor: at.append(option as i64),
			rest: rest.slice(2..),
			page_size: found.page_size(),
		}))
	}

	fn resolve_option<'t>(&mut self, container: &'t Container, index: Option<i64>, at: &Path) -> Result<Option<(usize, &'t [Node])>> {
		if let Some(list) = index.and_then(|i| usize::try_from(i).ok()).and_then(|i| container.list(i).map(|list| (i, list))) {
			return Ok(Some(list));
		}
		self.stale(
			at,
			StaleShape::Choice {
				index,
				count: container.list_count(),
			},
		)?;
		Ok(container.list(0).map(|list| (0, list)))
	}

	fn stale(&mut self, at: &Path, shape: StaleShape) -> Result<()> {
		match self.stale {
			StalePolicy::Reject => Err(Error::StaleShape { path: at.clone(), shape }),
			StalePolicy::Reset => {
				self.out.resets.push((at.clone(), shape));
				Ok(())
			}
		}
	}

	/// Renders one node; `selected` names the expanded container and its selected list.
	fn node(&mut self, node: &Node, here: &Path, selected: Option<(usize, i64)>) {
		let mut blocks = node.content_blocks();
		let mut controls: Vec<Element> = node
			.containers()
			.iter()
			.enumerate()
			.map(|(c, container)| {
				let state = match selected {
					Some((expanded, option)) if expanded == c => option,
					_ => SENTINEL,
				};
				container.render(self.root_key, &here.append(c as i64), state)
			})
			.collect();

		if !controls.is_empty()
			&& node.side_placement()
			&& let Some(Block::Section(section)) = blocks.first_mut()
			&& section.accessory.is_none()
		{
			section.accessory = Some(controls.remove(0));
		}

		self.out.blocks.extend(blocks);
		if !controls.is_empty() {
			self.out.blocks.extend(Block::action_rows(controls));
		}
	}

	fn navigation(&mut self, ancestor: &Path, range: Range<usize>, page: usize, len: usize) {
		let mut buttons = Vec::new();
		if range.start > 0 {
			let prev = range.start.saturating_sub(page);
			buttons.push(Button::new(PREV_LABEL, encode(self.root_key, &ancestor.append(prev as i64))).into());
		}
		if range.end < len {
			let next = range.start + page;
			buttons.push(Button::new(NEXT_LABEL, encode(self.root_key, &ancestor.append(next as i64))).into());
		}
		if !buttons.is_empty() {
			self.out.blocks.push(Block::actions(buttons));
		}
	}
}
