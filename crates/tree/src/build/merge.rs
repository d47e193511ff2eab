use trellis_blocks::Block;
use trellis_blocks::limits::SECTION_TEXT_LIMIT;

use crate::node::{Node, NodeContent};

/// Joins runs of plain text nodes into single nodes to save blocks.
///
/// A node is plain when it has no containers and its content is text or one section block
/// without an accessory. Adjacent plain nodes are joined with a blank line while the joined
/// text stays under the section text limit. Everything else passes through unchanged.
pub fn merge_simple(nodes: Vec<Node>) -> Vec<Node> {
	let mut out = Vec::with_capacity(nodes.len());
	let mut buffer: Option<String> = None;

	for node in nodes {
		let Some(text) = plain_text(&node) else {
			if let Some(text) = buffer.take() {
				out.push(Node::new(text));
			}
			out.push(node);
			continue;
		};

		buffer = Some(match buffer.take() {
			None => text,
			Some(mut joined) if joined.chars().count() + text.chars().count() + 2 < SECTION_TEXT_LIMIT => {
				joined.push_str("\n\n");
				joined.push_str(&text);
				joined
			}
			Some(full) => {
				out.push(Node::new(full));
				text
			}
		});
	}

	if let Some(text) = buffer {
		out.push(Node::new(text));
	}
	out
}

fn plain_text(node: &Node) -> Option<String> {
	if !node.containers().is_empty() {
		return None;
	}
	match node.content() {
		NodeContent::Text(text) => Some(text.clone()),
		NodeContent::Blocks(blocks) => match blocks.as_slice() {
			[block @ Block::Section(section)] if section.accessory.is_none() => block.text().map(str::to_string),
			_ => None,
		},
	}
}
