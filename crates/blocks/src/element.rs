use serde::{Deserialize, Serialize};

use crate::text::TextObject;

/// An interactive element.
///
/// Each variant carries the `action_id` echoed back by the host when the user interacts with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
	/// A push button.
	Button(Button),
	/// A dropdown picker.
	StaticSelect(StaticSelect),
	/// An overflow ("more") menu.
	Overflow(Overflow),
	/// A radio button group.
	RadioButtons(RadioButtons),
}

impl Element {
	/// Identifier echoed back on interaction.
	pub fn action_id(&self) -> &str {
		match self {
			Self::Button(b) => &b.action_id,
			Self::StaticSelect(s) => &s.action_id,
			Self::Overflow(o) => &o.action_id,
			Self::RadioButtons(r) => &r.action_id,
		}
	}

	/// Options offered by pickers; empty for buttons.
	pub fn options(&self) -> &[SelectOption] {
		match self {
			Self::Button(_) => &[],
			Self::StaticSelect(s) => &s.options,
			Self::Overflow(o) => &o.options,
			Self::RadioButtons(r) => &r.options,
		}
	}

	/// Option pre-marked as selected, if the element supports one.
	pub fn initial_option(&self) -> Option<&SelectOption> {
		match self {
			Self::StaticSelect(s) => s.initial_option.as_ref(),
			Self::RadioButtons(r) => r.initial_option.as_ref(),
			Self::Button(_) | Self::Overflow(_) => None,
		}
	}

	/// Visible label of a button.
	pub fn label(&self) -> Option<&str> {
		match self {
			Self::Button(b) => Some(b.text.text()),
			_ => None,
		}
	}
}

/// Visual emphasis of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
	/// Highlighted affirmative action.
	Primary,
	/// Destructive or closing action.
	Danger,
}

/// A push button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
	/// Plain text label.
	pub text: TextObject,
	/// Identifier echoed back on click.
	pub action_id: String,
	/// Optional emphasis.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style: Option<ButtonStyle>,
}

impl Button {
	/// Creates an unstyled button.
	pub fn new(text: impl Into<String>, action_id: impl Into<String>) -> Self {
		Self {
			text: TextObject::plain(text),
			action_id: action_id.into(),
			style: None,
		}
	}

	/// Sets the emphasis.
	pub fn with_style(mut self, style: ButtonStyle) -> Self {
		self.style = Some(style);
		self
	}
}

impl From<Button> for Element {
	fn from(button: Button) -> Self {
		Self::Button(button)
	}
}

/// One option of a picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	/// Plain text label.
	pub text: TextObject,
	/// Value echoed back when the option is chosen.
	pub value: String,
}

impl SelectOption {
	/// Creates an option.
	pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			text: TextObject::plain(label),
			value: value.into(),
		}
	}

	/// Visible label.
	pub fn label(&self) -> &str {
		self.text.text()
	}
}

/// A dropdown picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSelect {
	/// Text shown while nothing is selected.
	pub placeholder: TextObject,
	/// Identifier echoed back on selection.
	pub action_id: String,
	/// Offered options.
	pub options: Vec<SelectOption>,
	/// Pre-selected option.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub initial_option: Option<SelectOption>,
}

/// An overflow menu. The host offers no "initial option" for this element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overflow {
	/// Identifier echoed back on selection.
	pub action_id: String,
	/// Offered options.
	pub options: Vec<SelectOption>,
}

/// A radio button group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioButtons {
	/// Identifier echoed back on selection.
	pub action_id: String,
	/// Offered options.
	pub options: Vec<SelectOption>,
	/// Pre-selected option.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub initial_option: Option<SelectOption>,
}
