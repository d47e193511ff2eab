use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::limits::MAX_ACTION_ELEMENTS;
use crate::text::{TextObject, fit_section_text};

/// One block of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
	/// Text with an optional accessory element beside it.
	Section(SectionBlock),
	/// A row of interactive elements.
	Actions(ActionsBlock),
	/// Small print.
	Context(ContextBlock),
}

impl Block {
	/// Creates a markdown section, fitting the text to the section limit.
	pub fn section(text: &str) -> Self {
		Self::Section(SectionBlock {
			text: TextObject::mrkdwn(fit_section_text(text)),
			accessory: None,
		})
	}

	/// Creates a single-line markdown context block.
	pub fn context(text: impl Into<String>) -> Self {
		Self::Context(ContextBlock {
			elements: vec![TextObject::mrkdwn(text)],
		})
	}

	/// Creates an actions row.
	pub fn actions(elements: Vec<Element>) -> Self {
		Self::Actions(ActionsBlock { elements })
	}

	/// Packs elements into as many actions rows as the per-row limit requires.
	pub fn action_rows(elements: Vec<Element>) -> Vec<Self> {
		elements.chunks(MAX_ACTION_ELEMENTS).map(|chunk| Self::actions(chunk.to_vec())).collect()
	}

	/// Primary text of the block: section text or the first context element.
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Section(section) => Some(section.text.text()),
			Self::Context(context) => context.elements.first().map(TextObject::text),
			Self::Actions(_) => None,
		}
	}

	/// Accessory of a section block.
	pub fn accessory(&self) -> Option<&Element> {
		match self {
			Self::Section(section) => section.accessory.as_ref(),
			_ => None,
		}
	}

	/// Elements of an actions block.
	pub fn elements(&self) -> &[Element] {
		match self {
			Self::Actions(actions) => &actions.elements,
			_ => &[],
		}
	}

	/// Every interactive element in the block, in display order.
	pub fn interactive(&self) -> impl Iterator<Item = &Element> {
		self.accessory().into_iter().chain(self.elements())
	}
}

/// Text with an optional accessory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlock {
	/// Body text.
	pub text: TextObject,
	/// Element shown beside the text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub accessory: Option<Element>,
}

/// A row of interactive elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionsBlock {
	/// Elements, at most [`MAX_ACTION_ELEMENTS`].
	pub elements: Vec<Element>,
}

/// Small print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBlock {
	/// Text elements.
	pub elements: Vec<TextObject>,
}
