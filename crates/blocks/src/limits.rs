/// Maximum number of blocks the host accepts in one message.
pub const MAX_BLOCKS_PER_MESSAGE: usize = 50;

/// Maximum number of characters in a section block's text.
pub const SECTION_TEXT_LIMIT: usize = 3000;

/// Length section text is cut to when it would reach [`SECTION_TEXT_LIMIT`].
pub const TRUNCATED_TEXT_LEN: usize = 2845;

/// Suffix appended to section text cut by [`crate::text::fit_section_text`].
pub const TRUNCATION_NOTICE: &str = " \n_..(this block was truncated due to message limits).._";

/// Maximum number of elements in one actions block.
pub const MAX_ACTION_ELEMENTS: usize = 25;
