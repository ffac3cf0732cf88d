//! Bracket scanning for block regions.
//!
//! A block region is a `[ ... ]` span that is repeated once per element of a
//! sequence. Regions nest, so the end of a region is found by counting
//! brackets rather than by searching for the next `]`.

use std::ops::Range;

const OPEN: u8 = b'[';
const CLOSE: u8 = b']';

/// Return the byte offset of the `]` that closes the `[` at `open`.
///
/// Returns `None` when `open` does not point at a `[` or when the brackets
/// after it never balance. Both brackets are ASCII, so scanning bytes never
/// splits a multi-byte character.
pub fn find_matching_bracket(text: &str, open: usize) -> Option<usize> {
	let bytes = text.as_bytes();
	if bytes.get(open) != Some(&OPEN) {
		return None;
	}

	let mut depth = 0usize;
	for (offset, byte) in bytes.iter().enumerate().skip(open) {
		match *byte {
			OPEN => depth += 1,
			CLOSE => {
				depth -= 1;
				if depth == 0 {
					return Some(offset);
				}
			}
			_ => {}
		}
	}

	None
}

/// A located block region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
	/// Offset of the opening `[`.
	pub open: usize,
	/// Offset of the matching `]`.
	pub close: usize,
}

impl BlockSpan {
	/// The full region including both brackets.
	pub fn outer(&self) -> Range<usize> {
		self.open..self.close + 1
	}

	/// The item template between the brackets.
	pub fn inner(&self) -> Range<usize> {
		self.open + 1..self.close
	}
}

/// Find the leftmost block region at or after `from` whose interior
/// references `key`.
///
/// A region references `key` when it contains the scalar marker `{key}` or
/// a dotted marker starting with `{key.`. Regions that only mention other
/// keys are skipped, but the search still descends into them since a nested
/// region may reference `key`. Scanning stops at the first `[` that never
/// balances.
pub fn find_block(template: &str, key: &str, from: usize) -> Option<BlockSpan> {
	let scalar = format!("{{{key}}}");
	let dotted = format!("{{{key}.");
	let mut cursor = from;

	while let Some(relative) = template.get(cursor..)?.find('[') {
		let open = cursor + relative;
		let close = find_matching_bracket(template, open)?;
		let interior = &template[open + 1..close];

		if interior.contains(&scalar) || interior.contains(&dotted) {
			return Some(BlockSpan { open, close });
		}

		cursor = open + 1;
	}

	None
}
