//! Plain input field implementation.
//!
//! [`PlainField`] models a plain text input or textarea: a flat string whose
//! selection is fully addressable by character offset. It has no competing
//! edit framework, so the structured-edit strategy always lands on it, and
//! its edit signals are never canceled.

use unicode_segmentation::UnicodeSegmentation;

use crate::field::{
    char_slice, EditSignal, EditableTarget, SelectionDirection, SelectionOffsets, SignalResponse,
    TargetKind,
};

/// A plain text field with offset-addressable selection.
#[derive(Debug, Clone)]
pub struct PlainField {
    text: String,
    selection: SelectionOffsets,
    focused: bool,
}

impl Default for PlainField {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection: SelectionOffsets::collapsed(0),
            focused: true,
        }
    }

    /// Create a field with initial text and the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            selection: SelectionOffsets::collapsed(len),
            focused: true,
        }
    }

    /// Insert text at the selection, replacing any selected content.
    ///
    /// The cursor collapses to the end of the inserted text.
    pub fn insert_text(&mut self, insert: &str) {
        let start = self.selection.start();
        let end = self.selection.end();
        let prefix: String = self.text.chars().take(start).collect();
        let suffix: String = self.text.chars().skip(end).collect();
        self.text = format!("{prefix}{insert}{suffix}");
        self.selection = SelectionOffsets::collapsed(start + insert.chars().count());
    }

    /// Clamp a character offset into the text, snapping down to the nearest
    /// grapheme-cluster boundary so a cursor never lands inside a cluster.
    fn clamp_offset(&self, pos: usize) -> usize {
        let total = self.text.chars().count();
        let pos = pos.min(total);

        let mut boundary = 0;
        let mut chars_seen = 0;
        for grapheme in self.text.graphemes(true) {
            if chars_seen >= pos {
                break;
            }
            chars_seen += grapheme.chars().count();
            if chars_seen <= pos {
                boundary = chars_seen;
            }
        }
        boundary
    }
}

impl EditableTarget for PlainField {
    fn kind(&self) -> TargetKind {
        TargetKind::Plain
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        let len = self.text.chars().count();
        let start = self.selection.start().min(len);
        let end = self.selection.end().min(len);
        self.selection = SelectionOffsets::new(start, end, self.selection.direction());
    }

    fn selection(&self) -> SelectionOffsets {
        self.selection
    }

    fn set_selection(&mut self, selection: SelectionOffsets) {
        let start = self.clamp_offset(selection.start());
        let end = self.clamp_offset(selection.end());
        let direction = if start == end {
            SelectionDirection::None
        } else {
            selection.direction()
        };
        self.selection = SelectionOffsets::new(start, end, direction);
    }

    fn dispatch_edit(&mut self, signal: &EditSignal) -> SignalResponse {
        // No framework owns a plain field: notifications are observed but
        // never canceled, and a paste-like signal applies its transfer the
        // way a native field would.
        if let EditSignal::Paste(transfer) = signal {
            let text = transfer.text().to_string();
            self.insert_text(&text);
        }
        SignalResponse::Uncanceled
    }

    fn exec_insert_text(&mut self, text: &str) -> bool {
        self.insert_text(text);
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn selected_text(&self) -> String {
        char_slice(&self.text, self.selection.start(), self.selection.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{DataTransfer, FieldSnapshot};

    #[test]
    fn test_with_text_cursor_at_end() {
        let field = PlainField::with_text("hello");
        assert_eq!(field.text(), "hello");
        assert_eq!(field.selection(), SelectionOffsets::collapsed(5));
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut field = PlainField::with_text("hello world");
        field.set_selection(SelectionOffsets::new(0, 5, SelectionDirection::Forward));
        field.insert_text("goodbye");
        assert_eq!(field.text(), "goodbye world");
        assert_eq!(field.selection(), SelectionOffsets::collapsed(7));
    }

    #[test]
    fn test_insert_with_multibyte_text() {
        let mut field = PlainField::with_text("café bar");
        field.set_selection(SelectionOffsets::new(0, 4, SelectionDirection::Forward));
        field.insert_text("thé");
        assert_eq!(field.text(), "thé bar");
        assert_eq!(field.selection(), SelectionOffsets::collapsed(3));
    }

    #[test]
    fn test_set_selection_clamps() {
        let mut field = PlainField::with_text("abc");
        field.set_selection(SelectionOffsets::new(1, 99, SelectionDirection::Forward));
        assert_eq!(field.selection().start(), 1);
        assert_eq!(field.selection().end(), 3);
    }

    #[test]
    fn test_collapsed_selection_loses_direction() {
        let mut field = PlainField::with_text("abc");
        field.set_selection(SelectionOffsets::new(2, 2, SelectionDirection::Forward));
        assert_eq!(field.selection().direction(), SelectionDirection::None);
    }

    #[test]
    fn test_exec_insert_text() {
        let mut field = PlainField::with_text("abc");
        field.set_selection(SelectionOffsets::new(0, 3, SelectionDirection::Forward));
        assert!(field.exec_insert_text("xyz"));
        assert_eq!(field.text(), "xyz");
    }

    #[test]
    fn test_paste_signal_inserts_transfer() {
        let mut field = PlainField::with_text("abc");
        field.set_selection(SelectionOffsets::new(0, 3, SelectionDirection::Forward));
        let response =
            field.dispatch_edit(&EditSignal::Paste(DataTransfer::plain_text("pasted")));
        assert_eq!(response, SignalResponse::Uncanceled);
        assert_eq!(field.text(), "pasted");
    }

    #[test]
    fn test_restore_snapshot() {
        let mut field = PlainField::with_text("original");
        field.set_selection(SelectionOffsets::new(0, 8, SelectionDirection::Forward));
        let snapshot = FieldSnapshot::capture(&field);

        field.insert_text("mangled");
        assert_ne!(field.text(), "original");

        field.restore(&snapshot);
        assert_eq!(field.text(), "original");
        assert_eq!(field.selection(), snapshot.selection());
    }

    #[test]
    fn test_selected_text() {
        let mut field = PlainField::with_text("hello world");
        field.set_selection(SelectionOffsets::new(6, 11, SelectionDirection::Forward));
        assert_eq!(field.selected_text(), "world");
    }
}
