//! Verse splitting for stored lyrics.

/// Separator between verses as stored by the data producer: the literal
/// characters `\n\n` (backslash, n, backslash, n), not two newline bytes.
pub const VERSE_SEPARATOR: &str = "\\n\\n";

/// Split lyrics into verses. Empty text yields a single empty verse.
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_literal_escape_sequence() {
        let text = r"Ooh baby\nDon't you know\n\nI'm the one\n\nOoh";
        assert_eq!(split_verses(text), vec![r"Ooh baby\nDon't you know", "I'm the one", "Ooh"]);
    }

    #[test]
    fn real_newlines_are_not_separators() {
        assert_eq!(split_verses("a\n\nb"), vec!["a\n\nb"]);
    }

    #[test]
    fn empty_text_is_one_verse() {
        assert_eq!(split_verses(""), vec![""]);
    }
}
