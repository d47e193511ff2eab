use serde::{Deserialize, Serialize};

use crate::limits::{SECTION_TEXT_LIMIT, TRUNCATED_TEXT_LEN, TRUNCATION_NOTICE};

/// A text object as embedded in blocks and elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
	/// Markdown-formatted text.
	Mrkdwn {
		/// Raw markdown.
		text: String,
	},
	/// Unformatted text, required by element labels.
	PlainText {
		/// Raw text.
		text: String,
	},
}

impl TextObject {
	/// Creates a markdown text object.
	pub fn mrkdwn(text: impl Into<String>) -> Self {
		Self::Mrkdwn { text: text.into() }
	}

	/// Creates a plain text object.
	pub fn plain(text: impl Into<String>) -> Self {
		Self::PlainText { text: text.into() }
	}

	/// Returns the raw text regardless of formatting.
	pub fn text(&self) -> &str {
		match self {
			Self::Mrkdwn { text } | Self::PlainText { text } => text,
		}
	}
}

/// Fits arbitrary text into a single section block.
///
/// Text reaching [`SECTION_TEXT_LIMIT`] characters is cut to [`TRUNCATED_TEXT_LEN`] characters
/// and suffixed with [`TRUNCATION_NOTICE`]. Empty text becomes a single space, since the host
/// rejects empty sections.
pub fn fit_section_text(text: &str) -> String {
	if text.is_empty() {
		return " ".to_string();
	}
	if text.chars().count() < SECTION_TEXT_LIMIT {
		return text.to_string();
	}
	let mut cut: String = text.chars().take(TRUNCATED_TEXT_LEN).collect();
	cut.push_str(TRUNCATION_NOTICE);
	cut
}
