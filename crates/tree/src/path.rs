//! Expand pointers.
//!
//! A [`Path`] is a series of indexes into a node tree which recursively says what to expand.
//! At each depth the first index picks a sibling; below a node, the next index picks one of the
//! node's containers and, for multi-list containers, the index after that picks the option.

use std::fmt;
use std::ops::{Bound, RangeBounds};
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Separator between serialized path segments.
pub const DELIMITER: char = ',';

/// Reserved selection value meaning "collapse".
pub const SENTINEL: i64 = -1;

/// An immutable sequence of tree indexes.
///
/// Every operation returns a new path. No bounds are checked here; the renderer validates
/// indexes against the actual tree shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(SmallVec<[i64; 6]>);

impl Path {
	/// The empty path.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy with `index` appended.
	#[must_use]
	pub fn append(&self, index: i64) -> Self {
		let mut values = self.0.clone();
		values.push(index);
		Self(values)
	}

	/// Returns a copy with every value of `indexes` appended.
	#[must_use]
	pub fn extend(&self, indexes: impl IntoIterator<Item = i64>) -> Self {
		let mut values = self.0.clone();
		values.extend(indexes);
		Self(values)
	}

	/// Returns the sub-path in `range`, clipped to the path's bounds.
	#[must_use]
	pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
		let len = self.0.len();
		let start = match range.start_bound() {
			Bound::Included(&s) => s,
			Bound::Excluded(&s) => s.saturating_add(1),
			Bound::Unbounded => 0,
		}
		.min(len);
		let end = match range.end_bound() {
			Bound::Included(&e) => e.saturating_add(1),
			Bound::Excluded(&e) => e,
			Bound::Unbounded => len,
		}
		.min(len);
		if start >= end {
			return Self::new();
		}
		Self(SmallVec::from_slice(&self.0[start..end]))
	}

	/// Returns a copy without the last index.
	#[must_use]
	pub fn truncate_last(&self) -> Self {
		self.slice(..self.0.len().saturating_sub(1))
	}

	/// First index.
	pub fn head(&self) -> Option<i64> {
		self.0.first().copied()
	}

	/// Everything after the first index.
	#[must_use]
	pub fn tail(&self) -> Self {
		self.slice(1..)
	}

	/// Index at `position`.
	pub fn get(&self, position: usize) -> Option<i64> {
		self.0.get(position).copied()
	}

	/// Number of indexes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the path addresses nothing.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates the indexes.
	pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
		self.0.iter().copied()
	}

	/// Indexes as a slice.
	pub fn as_slice(&self) -> &[i64] {
		&self.0
	}

	/// Serializes to the compact delimited form, e.g. `0,2,-1`.
	pub fn serialize(&self) -> String {
		self.to_string()
	}

	/// Parses the compact delimited form. The empty string is the empty path.
	pub fn parse(input: &str) -> Result<Self> {
		input.parse()
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, index) in self.0.iter().enumerate() {
			if i > 0 {
				write!(f, "{DELIMITER}")?;
			}
			write!(f, "{index}")?;
		}
		Ok(())
	}
}

impl FromStr for Path {
	type Err = Error;

	fn from_str(input: &str) -> Result<Self> {
		if input.is_empty() {
			return Ok(Self::new());
		}
		input
			.split(DELIMITER)
			.map(|segment| {
				segment.parse::<i64>().map_err(|_| Error::MalformedPath {
					input: input.to_string(),
					segment: segment.to_string(),
				})
			})
			.collect()
	}
}

impl FromIterator<i64> for Path {
	fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl From<Vec<i64>> for Path {
	fn from(values: Vec<i64>) -> Self {
		Self(SmallVec::from_vec(values))
	}
}

impl<const N: usize> From<[i64; N]> for Path {
	fn from(values: [i64; N]) -> Self {
		Self(SmallVec::from_slice(&values))
	}
}

impl From<&[i64]> for Path {
	fn from(values: &[i64]) -> Self {
		Self(SmallVec::from_slice(values))
	}
}

impl<'a> IntoIterator for &'a Path {
	type Item = i64;
	type IntoIter = std::iter::Copied<std::slice::Iter<'a, i64>>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter().copied()
	}
}
