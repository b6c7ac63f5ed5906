use super::classify::{MessageKind, MessageStyle, classify};

/// One display unit of the console: exactly one received chunk.
///
/// A chunk holding several text lines stays a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleRow {
    pub text: String,
    pub kind: MessageKind,
}

impl ConsoleRow {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text);
        Self { text, kind }
    }

    pub fn style(&self) -> MessageStyle {
        self.kind.style()
    }
}

/// Rows appended in arrival order. Rows are never removed.
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    rows: Vec<ConsoleRow>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk as a new row and return it.
    pub fn push_chunk(&mut self, text: impl Into<String>) -> &ConsoleRow {
        let index = self.rows.len();
        self.rows.push(ConsoleRow::new(text));
        &self.rows[index]
    }

    pub fn rows(&self) -> &[ConsoleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_append_in_order() {
        let mut log = ConsoleLog::new();
        log.push_chunk("first");
        log.push_chunk("You got the BFG9000!");

        assert_eq!(log.len(), 2);
        assert_eq!(log.rows()[0].text, "first");
        assert_eq!(log.rows()[0].kind, MessageKind::Plain);
        assert_eq!(log.rows()[1].kind, MessageKind::Item);
    }

    #[test]
    fn test_multiline_chunk_is_one_row() {
        let mut log = ConsoleLog::new();
        let row = log.push_chunk("line one\nline two\n");
        assert_eq!(row.text, "line one\nline two\n");
        assert_eq!(log.len(), 1);
    }
}
