//! Chat front end for expandable trees.
//!
//! [`TreeUi`] registers trees, posts them through a [`Transport`] and answers the interactions
//! their controls produce by replacing the message with a re-rendered tree. [`ActionCallbacks`]
//! binds plain closures to one-off buttons and pickers.

/// Per-element closures.
pub mod callbacks;
/// Settings.
pub mod config;
/// Interaction handling.
pub mod dispatch;
mod error;
/// Chat host boundary.
pub mod transport;
mod tree_ui;

pub use callbacks::{ActionCallbacks, CALLBACK_PREFIX, Callback};
pub use config::{ConfigError, TreeUiConfig};
pub use dispatch::{Interaction, Phase, resolve_selection};
pub use error::{Error, Result};
pub use transport::{MessageHandle, Response, Transport};
pub use tree_ui::{PostNodesOptions, PostOptions, ROOT_NAMESPACE, TreeUi};
