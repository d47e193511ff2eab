//! Child containers and their interactive controls.
//!
//! A container is either a [`ListContainer`] (one child list behind an expand/collapse button) or
//! a [`MenuContainer`] (several named child lists behind a picker). Both render themselves as one
//! [`Element`] whose callback tokens encode where a click leads.

use serde::{Deserialize, Serialize};
use trellis_blocks::{Button, ButtonStyle, Element, Overflow, RadioButtons, SelectOption, StaticSelect, TextObject};

use crate::codec::{RootKey, encode};
use crate::node::Node;
use crate::path::{Path, SENTINEL};

/// Default number of children shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default label of an unexpanded list container; `{}` is the child count.
pub const DEFAULT_EXPAND_LABEL: &str = "expand {}";

/// Default label of an expanded list container; `{}` is the child count.
pub const DEFAULT_COLLAPSE_LABEL: &str = "collapse {}";

/// Label of the synthetic collapse option of a select picker. The host rejects empty labels.
const SELECT_COLLAPSE_LABEL: &str = " ";

/// Label of the synthetic collapse option of a radio group.
const RADIO_COLLAPSE_LABEL: &str = "(collapse)";

/// An expandable unit attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Container {
	/// One child list.
	List(ListContainer),
	/// Several selectable child lists.
	Menu(MenuContainer),
}

impl Container {
	/// Renders the container's control.
	///
	/// `path` addresses this container (the owning node's path plus the container index).
	/// `selected` is [`SENTINEL`] while collapsed, else the expanded list's index.
	pub fn render(&self, root_key: &RootKey, path: &Path, selected: i64) -> Element {
		match self {
			Self::List(list) => list.render(root_key, path, selected),
			Self::Menu(menu) => menu.render(root_key, path, selected),
		}
	}

	/// Children shown per page when expanded.
	pub fn page_size(&self) -> usize {
		match self {
			Self::List(list) => list.page_size,
			Self::Menu(menu) => menu.page_size,
		}
	}

	/// Whether expanding needs an option index after the container index.
	pub fn is_multi_list(&self) -> bool {
		matches!(self, Self::Menu(_))
	}

	/// Number of child lists.
	pub fn list_count(&self) -> usize {
		match self {
			Self::List(_) => 1,
			Self::Menu(menu) => menu.options.len(),
		}
	}

	/// Child list `index`.
	pub fn list(&self, index: usize) -> Option<&[Node]> {
		match self {
			Self::List(list) => (index == 0).then_some(list.children.as_slice()),
			Self::Menu(menu) => menu.options.get(index).map(|option| option.nodes.as_slice()),
		}
	}
}

impl From<ListContainer> for Container {
	fn from(list: ListContainer) -> Self {
		Self::List(list)
	}
}

impl From<MenuContainer> for Container {
	fn from(menu: MenuContainer) -> Self {
		Self::Menu(menu)
	}
}

/// A single child list behind an expand/collapse button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContainer {
	children: Vec<Node>,
	page_size: usize,
	expand_label: String,
	collapse_label: String,
}

impl ListContainer {
	/// Creates a container with default labels and page size.
	pub fn new(children: Vec<Node>) -> Self {
		Self {
			children,
			page_size: DEFAULT_PAGE_SIZE,
			expand_label: DEFAULT_EXPAND_LABEL.to_string(),
			collapse_label: DEFAULT_COLLAPSE_LABEL.to_string(),
		}
	}

	/// Sets the expand/collapse label formats.
	#[must_use]
	pub fn with_labels(mut self, expand: impl Into<String>, collapse: impl Into<String>) -> Self {
		self.expand_label = expand.into();
		self.collapse_label = collapse.into();
		self
	}

	/// Uses the same label whether expanded or not.
	#[must_use]
	pub fn with_static_label(self, label: impl Into<String>) -> Self {
		let label = label.into();
		self.with_labels(label.clone(), label)
	}

	/// Sets the page size, floored at 1.
	#[must_use]
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size.max(1);
		self
	}

	/// Child nodes.
	pub fn children(&self) -> &[Node] {
		&self.children
	}

	fn render(&self, root_key: &RootKey, path: &Path, selected: i64) -> Element {
		let count = self.children.len();
		if selected == SENTINEL {
			Button::new(format_count(&self.expand_label, count), encode(root_key, &path.append(0))).into()
		} else {
			Button::new(format_count(&self.collapse_label, count), encode(root_key, &path.truncate_last()))
				.with_style(ButtonStyle::Danger)
				.into()
		}
	}
}

/// How a [`MenuContainer`] presents its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum MenuStyle {
	/// Dropdown picker.
	Select {
		/// Text shown while nothing is selected.
		#[serde(default)]
		placeholder: Option<String>,
	},
	/// Overflow menu.
	Overflow,
	/// Radio group.
	Radio,
}

/// One named child list of a [`MenuContainer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
	label: String,
	nodes: Vec<Node>,
}

impl MenuOption {
	/// Creates an option. A `{}` in the label is replaced by the node count.
	pub fn new(label: impl Into<String>, nodes: Vec<Node>) -> Self {
		Self {
			label: label.into(),
			nodes,
		}
	}

	/// Label with the node count filled in.
	pub fn label(&self) -> String {
		format_count(&self.label, self.nodes.len())
	}

	/// Child nodes revealed by this option.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}
}

/// Several named child lists behind one picker; choosing option `i` reveals list `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuContainer {
	style: MenuStyle,
	options: Vec<MenuOption>,
	page_size: usize,
}

impl MenuContainer {
	/// Creates a menu in the given style.
	pub fn new(style: MenuStyle, options: Vec<MenuOption>) -> Self {
		Self {
			style,
			options,
			page_size: DEFAULT_PAGE_SIZE,
		}
	}

	/// Dropdown picker.
	pub fn select(options: Vec<MenuOption>, placeholder: Option<String>) -> Self {
		Self::new(MenuStyle::Select { placeholder }, options)
	}

	/// Overflow menu.
	pub fn overflow(options: Vec<MenuOption>) -> Self {
		Self::new(MenuStyle::Overflow, options)
	}

	/// Radio group.
	pub fn radio(options: Vec<MenuOption>) -> Self {
		Self::new(MenuStyle::Radio, options)
	}

	/// Sets the page size, floored at 1.
	#[must_use]
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size.max(1);
		self
	}

	/// Options in display order.
	pub fn options(&self) -> &[MenuOption] {
		&self.options
	}

	/// Presentation style.
	pub fn style(&self) -> &MenuStyle {
		&self.style
	}

	fn render(&self, root_key: &RootKey, path: &Path, selected: i64) -> Element {
		// Picks append `[value, 0]` to this path, or drop its last index for the sentinel.
		let action_id = encode(root_key, path);
		let options: Vec<SelectOption> = self
			.options
			.iter()
			.enumerate()
			.map(|(i, option)| SelectOption::new(option.label(), i.to_string()))
			.collect();
		let current = usize::try_from(selected).ok().and_then(|i| options.get(i).cloned().map(|o| (i, o)));
		let collapse = |label: &str| SelectOption::new(label, SENTINEL.to_string());

		match (&self.style, current) {
			(MenuStyle::Select { placeholder }, current) => {
				let placeholder = TextObject::plain(placeholder.clone().unwrap_or_default());
				let (options, initial_option) = match current {
					None => (options, None),
					Some((_, option)) => {
						let mut with_collapse = Vec::with_capacity(options.len() + 1);
						with_collapse.push(collapse(SELECT_COLLAPSE_LABEL));
						with_collapse.extend(options);
						(with_collapse, Some(option))
					}
				};
				Element::StaticSelect(StaticSelect {
					placeholder,
					action_id,
					options,
					initial_option,
				})
			}
			(MenuStyle::Overflow, current) => {
				let mut options = options;
				if let Some((i, option)) = current {
					options[i] = collapse(&format!("> {}", option.label()));
				}
				Element::Overflow(Overflow { action_id, options })
			}
			(MenuStyle::Radio, current) => {
				let (options, initial_option) = match current {
					None => (options, None),
					Some((_, option)) => {
						let mut options = options;
						options.push(collapse(RADIO_COLLAPSE_LABEL));
						(options, Some(option))
					}
				};
				Element::RadioButtons(RadioButtons {
					action_id,
					options,
					initial_option,
				})
			}
		}
	}
}

/// Replaces every `{}` in `format` with `count`.
pub(crate) fn format_count(format: &str, count: usize) -> String {
	format.replace("{}", &count.to_string())
}
