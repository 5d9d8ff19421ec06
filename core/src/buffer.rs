//! Composition buffer with confirmed/composing regions and a cursor model.
//!
//! The buffer splits in-flight text into two regions: `confirmed` holds
//! characters already locked in (converted or accepted), `composing` holds
//! characters still being edited. The cursor is a character offset into the
//! concatenation `confirmed ++ composing`; `None` is the append-only fast
//! path meaning "logical end".
//!
//! Invariant: `0 <= cursor <= total_chars`, and a cursor equal to the total
//! length is always normalized back to `None`.

/// Confirmed + composing text with an optional explicit cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposingBuffer {
    confirmed: String,
    composing: String,
    cursor: Option<usize>, // Char offset into confirmed ++ composing
}

impl ComposingBuffer {
    /// Create a new empty buffer with the cursor at the logical end.
    pub fn new() -> Self {
        Self::default()
    }

    /// The locked region.
    pub fn confirmed(&self) -> &str {
        &self.confirmed
    }

    /// The still-editable region.
    pub fn composing(&self) -> &str {
        &self.composing
    }

    /// Explicit cursor offset, if one is set.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn confirmed_chars(&self) -> usize {
        self.confirmed.chars().count()
    }

    pub fn composing_chars(&self) -> usize {
        self.composing.chars().count()
    }

    pub fn total_chars(&self) -> usize {
        self.confirmed_chars() + self.composing_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.composing.is_empty()
    }

    /// Both regions concatenated, as the host renders them.
    pub fn combined(&self) -> String {
        let mut s = String::with_capacity(self.confirmed.len() + self.composing.len());
        s.push_str(&self.confirmed);
        s.push_str(&self.composing);
        s
    }

    /// Cursor offset if set, otherwise the logical end.
    pub fn effective_cursor(&self) -> usize {
        self.cursor.unwrap_or_else(|| self.total_chars())
    }

    /// Whether the effective cursor sits inside the composing region.
    pub fn cursor_in_composing(&self) -> bool {
        self.effective_cursor() > self.confirmed_chars()
    }

    pub fn clear(&mut self) {
        self.confirmed.clear();
        self.composing.clear();
        self.cursor = None;
    }

    pub fn clear_composing(&mut self) {
        self.composing.clear();
        self.normalize();
    }

    /// Replace the composing region wholesale (e.g. re-synced from a
    /// transliterator's display text). Only valid on the append-only path.
    pub fn set_composing(&mut self, text: &str) {
        debug_assert!(self.cursor.is_none());
        self.composing.clear();
        self.composing.push_str(text);
    }

    pub fn set_confirmed(&mut self, text: &str) {
        self.confirmed.clear();
        self.confirmed.push_str(text);
        self.normalize();
    }

    pub fn push_composing(&mut self, text: &str) {
        self.composing.push_str(text);
    }

    pub fn pop_composing(&mut self) -> Option<char> {
        self.composing.pop()
    }

    pub fn append_confirmed(&mut self, text: &str) {
        self.confirmed.push_str(text);
    }

    pub fn pop_confirmed(&mut self) -> Option<char> {
        self.confirmed.pop()
    }

    /// Insert text at the effective cursor.
    ///
    /// With no explicit cursor this appends to the composing region. An
    /// explicit offset inserts into whichever region it falls in; offsets
    /// inside the confirmed region are legal whenever a cursor is positioned
    /// there. The cursor advances past the inserted text.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let inserted = text.chars().count();
        match self.cursor {
            None => self.composing.push_str(text),
            Some(pos) => {
                let confirmed_len = self.confirmed_chars();
                if pos >= confirmed_len {
                    let byte = char_to_byte(&self.composing, pos - confirmed_len);
                    self.composing.insert_str(byte, text);
                } else {
                    let byte = char_to_byte(&self.confirmed, pos);
                    self.confirmed.insert_str(byte, text);
                }
                self.cursor = Some(pos + inserted);
                self.normalize();
            }
        }
    }

    /// Delete the character immediately before the effective cursor.
    ///
    /// A cursor at offset 0 is a guarded no-op. After deletion an offset
    /// equal to the new total length is normalized back to the logical end.
    pub fn delete_one(&mut self) -> bool {
        let pos = self.effective_cursor();
        if pos == 0 {
            return false;
        }
        let confirmed_len = self.confirmed_chars();
        if pos > confirmed_len {
            remove_char_at(&mut self.composing, pos - confirmed_len - 1);
        } else {
            remove_char_at(&mut self.confirmed, pos - 1);
        }
        self.cursor = Some(pos - 1);
        self.normalize();
        true
    }

    /// Move the cursor one character left. Returns whether it moved.
    pub fn move_left(&mut self) -> bool {
        let pos = self.effective_cursor();
        if pos == 0 {
            return false;
        }
        self.cursor = Some(pos - 1);
        true
    }

    /// Move the cursor one character right, normalizing at the end.
    pub fn move_right(&mut self) -> bool {
        let pos = self.effective_cursor();
        if pos >= self.total_chars() {
            return false;
        }
        self.cursor = Some(pos + 1);
        self.normalize();
        true
    }

    pub fn reset_cursor_to_end(&mut self) {
        self.cursor = None;
    }

    /// The character immediately before the effective cursor, if any.
    pub fn char_before_cursor(&self) -> Option<char> {
        let pos = self.effective_cursor();
        if pos == 0 {
            return None;
        }
        self.combined().chars().nth(pos - 1)
    }

    /// Replace the composing-region character immediately before the cursor.
    /// Returns false when the cursor is at 0 or inside the confirmed region.
    pub fn replace_composing_char_before_cursor(&mut self, ch: char) -> bool {
        let pos = self.effective_cursor();
        let confirmed_len = self.confirmed_chars();
        if pos == 0 || pos <= confirmed_len {
            return false;
        }
        let offset = pos - confirmed_len - 1;
        remove_char_at(&mut self.composing, offset);
        let byte = char_to_byte(&self.composing, offset);
        self.composing.insert(byte, ch);
        true
    }

    fn normalize(&mut self) {
        if self.cursor == Some(self.total_chars()) {
            self.cursor = None;
        }
        debug_assert!(self.cursor.map_or(true, |n| n <= self.total_chars()));
    }
}

fn char_to_byte(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn remove_char_at(s: &mut String, char_offset: usize) {
    let byte = char_to_byte(s, char_offset);
    if byte < s.len() {
        s.remove(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_fast_path() {
        let mut buf = ComposingBuffer::new();
        buf.insert("か");
        buf.insert("な");
        assert_eq!(buf.composing(), "かな");
        assert_eq!(buf.cursor(), None);
        assert_eq!(buf.effective_cursor(), 2);
    }

    #[test]
    fn insert_mid_composing_advances_cursor() {
        let mut buf = ComposingBuffer::new();
        buf.insert("かな");
        buf.move_left(); // cursor = 1
        buf.insert("き");
        assert_eq!(buf.composing(), "かきな");
        assert_eq!(buf.cursor(), Some(2));
    }

    #[test]
    fn insert_mid_confirmed_is_legal() {
        let mut buf = ComposingBuffer::new();
        buf.append_confirmed("漢字");
        buf.push_composing("かな");
        buf.move_left();
        buf.move_left();
        buf.move_left(); // cursor = 1, inside confirmed
        buf.insert("字");
        assert_eq!(buf.confirmed(), "漢字字");
        assert_eq!(buf.composing(), "かな");
        assert_eq!(buf.cursor(), Some(2));
    }

    #[test]
    fn delete_from_each_region() {
        let mut buf = ComposingBuffer::new();
        buf.append_confirmed("漢");
        buf.push_composing("かな");
        buf.move_left(); // cursor = 2, before な
        assert!(buf.delete_one()); // removes か
        assert_eq!(buf.composing(), "な");
        assert_eq!(buf.cursor(), Some(1));

        assert!(buf.delete_one()); // removes 漢 from confirmed
        assert_eq!(buf.confirmed(), "");
        assert_eq!(buf.cursor(), Some(0));
    }

    #[test]
    fn delete_at_offset_zero_is_noop() {
        let mut buf = ComposingBuffer::new();
        buf.push_composing("か");
        buf.move_left();
        assert_eq!(buf.cursor(), Some(0));
        assert!(!buf.delete_one());
        assert_eq!(buf.composing(), "か");
    }

    #[test]
    fn delete_at_end_normalizes_cursor() {
        let mut buf = ComposingBuffer::new();
        buf.push_composing("かな");
        buf.move_left(); // Some(1)
        buf.move_right(); // back to the end; must normalize
        assert_eq!(buf.cursor(), None);

        buf.move_left();
        buf.move_right();
        assert_eq!(buf.cursor(), None);

        // Deleting the last char while the cursor trails it also normalizes
        let mut buf = ComposingBuffer::new();
        buf.push_composing("か");
        assert!(buf.delete_one());
        assert_eq!(buf.cursor(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn cursor_invariant_under_mixed_edits() {
        let mut buf = ComposingBuffer::new();
        buf.append_confirmed("ab");
        buf.push_composing("cd");
        for _ in 0..10 {
            buf.move_left();
        }
        assert_eq!(buf.effective_cursor(), 0);
        buf.insert("x");
        buf.delete_one();
        buf.move_right();
        buf.delete_one();
        let pos = buf.effective_cursor();
        assert!(pos <= buf.total_chars());
    }

    #[test]
    fn replace_composing_char_respects_locked_region() {
        let mut buf = ComposingBuffer::new();
        buf.append_confirmed("漢");
        buf.push_composing("は");
        assert!(buf.replace_composing_char_before_cursor('ば'));
        assert_eq!(buf.composing(), "ば");

        // Cursor inside the confirmed region: no-op
        buf.move_left();
        assert!(!buf.replace_composing_char_before_cursor('ぱ'));
        assert_eq!(buf.composing(), "ば");
    }

    #[test]
    fn char_before_cursor_spans_regions() {
        let mut buf = ComposingBuffer::new();
        buf.append_confirmed("漢");
        buf.push_composing("か");
        assert_eq!(buf.char_before_cursor(), Some('か'));
        buf.move_left();
        assert_eq!(buf.char_before_cursor(), Some('漢'));
        buf.move_left();
        assert_eq!(buf.char_before_cursor(), None);
    }
}
