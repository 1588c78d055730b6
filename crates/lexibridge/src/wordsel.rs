//! Word-by-word selection extension.
//!
//! [`extend`] grows or shrinks a target's selection by one word in the
//! requested direction, mirroring native word-selection semantics:
//!
//! - A selection whose active end opposes the requested direction **shrinks**
//!   toward its anchor instead of growing, clamped at the anchor.
//! - A collapsed cursor strictly inside a word selects that whole word,
//!   placing the active end on the side the request points to.
//! - Otherwise the active end moves one word further.
//!
//! Plain fields are driven entirely by character offsets. Rich editable
//! surfaces maintain their own selection model that offset arithmetic cannot
//! safely address, so the same semantics are delegated to the host's native
//! extend-by-word primitive.

use crate::field::{
    EditableTarget, SelectionDirection, SelectionOffsets, TargetKind, WordDirection,
};
use crate::logging::targets;

/// Check if a character belongs to a word.
///
/// Words are ASCII alphanumerics, underscore, and the extended Latin letter
/// ranges (Latin-1 Supplement plus Latin Extended-A/B, minus the two
/// arithmetic signs embedded in Latin-1).
fn is_word_char(c: char) -> bool {
    if c.is_ascii_alphanumeric() || c == '_' {
        return true;
    }
    ('\u{00C0}'..='\u{024F}').contains(&c) && c != '\u{00D7}' && c != '\u{00F7}'
}

/// The next word boundary at or after `pos`: skip the remaining characters
/// of the current word, skip separators, skip the following word.
fn next_word_boundary(chars: &[char], pos: usize) -> usize {
    let mut i = pos.min(chars.len());
    while i < chars.len() && is_word_char(chars[i]) {
        i += 1;
    }
    while i < chars.len() && !is_word_char(chars[i]) {
        i += 1;
    }
    while i < chars.len() && is_word_char(chars[i]) {
        i += 1;
    }
    i
}

/// The previous word boundary before `pos`: step back one position, skip
/// separators, skip back through the preceding word.
fn prev_word_boundary(chars: &[char], pos: usize) -> usize {
    if pos == 0 || chars.is_empty() {
        return 0;
    }
    let mut i = pos.min(chars.len()) - 1;
    while i > 0 && !is_word_char(chars[i]) {
        i -= 1;
    }
    while i > 0 && is_word_char(chars[i - 1]) {
        i -= 1;
    }
    i
}

/// Check if a collapsed cursor at `pos` sits strictly inside a word: word
/// characters on both adjacent sides.
fn inside_word(chars: &[char], pos: usize) -> bool {
    pos > 0 && pos < chars.len() && is_word_char(chars[pos - 1]) && is_word_char(chars[pos])
}

/// Extend or shrink the target's selection by one word.
pub fn extend(target: &mut dyn EditableTarget, direction: WordDirection) {
    if target.kind() == TargetKind::Rich {
        let handled = target.extend_selection_word(direction);
        tracing::trace!(
            target: targets::WORDSEL,
            ?direction,
            handled,
            "delegated to native word extension"
        );
        return;
    }

    let chars: Vec<char> = target.text().chars().collect();
    let sel = target.selection();

    let next = match direction {
        WordDirection::Next => extend_next(&chars, sel),
        WordDirection::Previous => extend_previous(&chars, sel),
    };
    target.set_selection(next);
}

fn extend_next(chars: &[char], sel: SelectionOffsets) -> SelectionOffsets {
    // Active end at the start and a request toward the end: shrink.
    if !sel.is_collapsed() && sel.direction() == SelectionDirection::Backward {
        let new_start = next_word_boundary(chars, sel.start());
        if new_start >= sel.end() {
            return SelectionOffsets::collapsed(sel.end());
        }
        return SelectionOffsets::new(new_start, sel.end(), SelectionDirection::Backward);
    }

    if sel.is_collapsed() && inside_word(chars, sel.start()) {
        let word_start = prev_word_boundary(chars, sel.start() + 1);
        let word_end = next_word_boundary_of_current(chars, sel.start());
        return SelectionOffsets::new(word_start, word_end, SelectionDirection::Forward);
    }

    let new_end = next_word_boundary(chars, sel.end());
    SelectionOffsets::new(sel.start(), new_end, SelectionDirection::Forward)
}

fn extend_previous(chars: &[char], sel: SelectionOffsets) -> SelectionOffsets {
    // Active end at the end and a request toward the start: shrink.
    if !sel.is_collapsed() && sel.direction() == SelectionDirection::Forward {
        let new_end = prev_word_boundary(chars, sel.end());
        if new_end <= sel.start() {
            return SelectionOffsets::collapsed(sel.start());
        }
        return SelectionOffsets::new(sel.start(), new_end, SelectionDirection::Forward);
    }

    if sel.is_collapsed() && inside_word(chars, sel.start()) {
        let word_start = prev_word_boundary(chars, sel.start() + 1);
        let word_end = next_word_boundary_of_current(chars, sel.start());
        return SelectionOffsets::new(word_start, word_end, SelectionDirection::Backward);
    }

    let new_start = prev_word_boundary(chars, sel.start());
    SelectionOffsets::new(new_start, sel.end(), SelectionDirection::Backward)
}

/// End of the word the position is inside: skip word characters only, without
/// running on into the following word.
fn next_word_boundary_of_current(chars: &[char], pos: usize) -> usize {
    let mut i = pos.min(chars.len());
    while i < chars.len() && is_word_char(chars[i]) {
        i += 1;
    }
    i
}
