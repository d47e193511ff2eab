use serde_json::Value;

use super::merge::merge_simple;
use crate::container::{DEFAULT_COLLAPSE_LABEL, DEFAULT_EXPAND_LABEL, ListContainer, MenuOption, format_count};
use crate::node::{Node, NodeContent};

/// Bullet repeated once per nesting level in front of every JSON entry.
const INDENT: &str = "•";

/// Label of the container created by [`from_json`].
const DETAILS_LABEL: &str = "details";

/// Creates a node showing `content` with a "details" button that reveals `value` as a tree.
pub fn from_json(content: impl Into<NodeContent>, value: &Value, page_size: usize, optimize: bool) -> Node {
	Node::new(content).with_container(ListContainer::for_json_details(value, DETAILS_LABEL, page_size, optimize))
}

/// Converts the entries of a JSON value into child nodes.
///
/// Returns the nodes together with the number of entries they show, which differs from the node
/// count once `optimize` merged plain entries.
pub fn json_children(value: &Value, page_size: usize, optimize: bool) -> (Vec<Node>, usize) {
	match convert(value, "", false) {
		Converted::Scalar(text) => (vec![Node::new(text)], 1),
		Converted::Entries(entries) => entries_to_nodes(entries, 0, page_size, optimize),
	}
}

impl ListContainer {
	/// Creates a container revealing `value` as a tree.
	///
	/// `name` labels the button in both states; a `{}` in it is replaced by the entry count. An
	/// empty name falls back to the default expand/collapse labels.
	pub fn for_json_details(value: &Value, name: &str, page_size: usize, optimize: bool) -> Self {
		let (children, count) = json_children(value, page_size, optimize);
		let container = Self::new(children).with_page_size(page_size);
		if name.is_empty() {
			container.with_labels(format_count(DEFAULT_EXPAND_LABEL, count), format_count(DEFAULT_COLLAPSE_LABEL, count))
		} else {
			container.with_static_label(format_count(name, count))
		}
	}
}

impl MenuOption {
	/// Creates an option revealing `value` as a tree. A `{}` in the label is replaced by the entry
	/// count.
	pub fn from_json(label: &str, value: &Value, page_size: usize, optimize: bool) -> Self {
		let (children, count) = json_children(value, page_size, optimize);
		Self::new(format_count(label, count), children)
	}
}

enum Converted<'v> {
	Scalar(String),
	Entries(Vec<(String, &'v Value)>),
}

/// Flattens a value into keyed entries, inlining chains of single-entry containers as
/// `key: key: value` when `inline_solo` is set.
fn convert<'v>(value: &'v Value, prefix: &str, inline_solo: bool) -> Converted<'v> {
	let entries: Vec<(String, &Value)> = match value {
		Value::Array(items) => {
			let width = if items.len() < 10 { 1 } else { 2 };
			items.iter().enumerate().map(|(i, item)| (format!("[{:>width$}]", i + 1), item)).collect()
		}
		Value::Object(map) => map.iter().map(|(key, item)| (key.clone(), item)).collect(),
		scalar => return Converted::Scalar(format!("{prefix}{}", scalar_text(scalar))),
	};

	if inline_solo && let [(key, item)] = entries.as_slice() {
		return convert(*item, &format!("{prefix}{key}: "), true);
	}
	Converted::Entries(entries.into_iter().map(|(key, item)| (format!("{prefix}{key}"), item)).collect())
}

fn entries_to_nodes(entries: Vec<(String, &Value)>, level: usize, page_size: usize, optimize: bool) -> (Vec<Node>, usize) {
	let children: Vec<Node> = entries
		.into_iter()
		.filter(|(_, item)| is_shown(item))
		.map(|(key, item)| entry_node(&key, item, level + 1, page_size, optimize))
		.collect();
	let count = children.len();
	let children = if optimize { merge_simple(children) } else { children };
	(children, count)
}

fn entry_node(name: &str, value: &Value, level: usize, page_size: usize, optimize: bool) -> Node {
	let indent = INDENT.repeat(level);
	match convert(value, "", true) {
		Converted::Scalar(text) => Node::new(format!("{indent} {name}: {text}")),
		Converted::Entries(entries) => {
			let (children, count) = entries_to_nodes(entries, level, page_size, optimize);
			Node::with_side_button(
				format!("{indent} {name}"),
				children,
				format_count(DEFAULT_EXPAND_LABEL, count),
				format_count(DEFAULT_COLLAPSE_LABEL, count),
				page_size,
			)
		}
	}
}

/// Null, empty strings and empty containers are hidden; `false` and `0` are shown.
fn is_shown(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::String(s) => !s.is_empty(),
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
		Value::Bool(_) | Value::Number(_) => true,
	}
}

fn scalar_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
