//! Message blocks and interactive elements for chat surfaces.
//!
//! A posted message is a flat list of [`Block`]s. Content lives in section and context blocks;
//! interactivity lives in [`Element`]s, which are either a section's accessory or members of an
//! actions row. Every element carries an `action_id` that the host echoes back on interaction.
//!
//! All types serialize to the host's JSON block format via serde.

/// Top-level block types.
pub mod block;
/// Interactive elements (buttons, pickers, menus).
pub mod element;
/// Host-imposed size limits.
pub mod limits;
/// Text objects and text helpers.
pub mod text;

pub use block::{ActionsBlock, Block, ContextBlock, SectionBlock};
pub use element::{Button, ButtonStyle, Element, Overflow, RadioButtons, SelectOption, StaticSelect};
pub use text::TextObject;
