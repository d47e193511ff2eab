//! Expandable node trees for chat messages.
//!
//! A tree is registered once under a [`RootKey`]. Every interactive control it renders carries a
//! callback token (see [`codec`]) naming the root key and the [`Path`] the tree should be
//! re-rendered at when the control is used, so a click can be answered from the token alone.
//!
//! The [`Renderer`] flattens a tree along a path into at most a ceiling's worth of blocks,
//! paginating every sibling list and shrinking pages further when the output would overflow.

/// Construction helpers.
pub mod build;
/// Callback token codec.
pub mod codec;
/// Child containers.
pub mod container;
mod error;
/// Tree nodes.
pub mod node;
/// Expand paths.
pub mod path;
/// Tree flattening.
pub mod render;

pub use codec::{RootKey, decode, encode, is_tree_token};
pub use container::{Container, ListContainer, MenuContainer, MenuOption, MenuStyle};
pub use error::{Error, Result, StaleShape, TokenDefect};
pub use node::{Node, NodeContent};
pub use path::{Path, SENTINEL};
pub use render::{RenderOptions, Renderer, StalePolicy};
