use serde::{Deserialize, Serialize};
use trellis_blocks::Block;

/// Address of a posted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHandle {
	/// Channel the message lives in.
	pub channel: String,
	/// Host timestamp identifying the message within the channel.
	pub ts: String,
}

/// Outcome of a host call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
	/// HTTP-like status code.
	pub status: u16,
	/// Raw response body, used in failure notices.
	#[serde(default)]
	pub body: Option<String>,
	/// The posted or replaced message.
	#[serde(default)]
	pub message: Option<MessageHandle>,
}

impl Response {
	/// A successful response for `message`.
	pub fn ok(message: MessageHandle) -> Self {
		Self {
			status: 200,
			body: None,
			message: Some(message),
		}
	}

	/// A failed response.
	pub fn failed(status: u16, body: impl Into<String>) -> Self {
		Self {
			status,
			body: Some(body.into()),
			message: None,
		}
	}

	/// Whether the status is in the 2xx range.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Chat host boundary.
///
/// Both calls are synchronous. Failures are reported through the [`Response`] status.
pub trait Transport: Send + Sync {
	/// Posts a new message to `target` with notification text `text`.
	fn post(&self, target: &str, text: &str, blocks: &[Block]) -> Response;

	/// Replaces the blocks of an existing message.
	fn replace(&self, message: &MessageHandle, blocks: &[Block]) -> Response;
}
