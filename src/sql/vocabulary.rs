//! Character classes and keyword sets used by the tokenizer and the extractor
//!
//! Everything here is a frozen table. Several characters belong to more than
//! one class (`*` is an operator, a special character and a word character);
//! the tokenizer resolves that by testing the classes in a fixed order, see
//! [`crate::sql::tokenizer`].

/// Punctuation emitted as [`SpecialCharacter`](super::token::TokenKind::SpecialCharacter) runs
pub const SPECIAL_CHARACTERS: &[char] = &['$', '[', ']', '(', ')', ',', ':', ';', '*'];

pub const OPERATOR_CHARACTERS: &[char] = &[
    '+', '-', '*', '/', '<', '>', '=', '~', '!', '@', '%', '^', '&', '|', '`', '?',
];

/// Single characters skipped between tokens. CR-LF needs no entry of its own.
pub const WHITESPACE_CHARACTERS: &[char] = &[' ', '\t', '\n', '\r'];

pub const DECIMAL_POINT: char = '.';
pub const STRING_DELIMITER: char = '\'';
pub const QUOTED_IDENTIFIER: char = '"';

/// Words that introduce a run of object references
pub const KEYWORDS_OF_INTEREST: &[&str] = &["into", "with", "alter", "table", "drop", "join", "from"];

/// Words (and parentheses) that end a run of object references
pub const KEYWORD_NAMES: &[&str] = &[
    "select", "insert", "delete", "update", "create", "drop", "alter", "on", "where", "group", "by",
    "left", "right", "normal", "outer", "having", "order", "values", "as", "(", ")",
];

pub fn is_whitespace(c: char) -> bool {
    WHITESPACE_CHARACTERS.contains(&c)
}

pub fn is_operator(c: char) -> bool {
    OPERATOR_CHARACTERS.contains(&c)
}

pub fn is_special_character(c: char) -> bool {
    SPECIAL_CHARACTERS.contains(&c)
}

/// Digits, the decimal point and the string delimiter start a constant
pub fn is_constant_start(c: char) -> bool {
    c.is_ascii_digit() || c == DECIMAL_POINT || c == STRING_DELIMITER
}

pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == QUOTED_IDENTIFIER
}

/// Characters that may continue a word once it has started
///
/// Includes `.` so qualified names stay whole, and absorbs `$`, `*` and `"`.
pub fn is_identifier_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '*' | '"')
}

/// Expects lowercased text
pub fn is_keyword_of_interest(word: &str) -> bool {
    KEYWORDS_OF_INTEREST.contains(&word)
}

/// Expects lowercased text
pub fn is_keyword_name(word: &str) -> bool {
    KEYWORD_NAMES.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_classes() {
        assert!(is_operator('*'));
        assert!(is_special_character('*'));
        assert!(is_identifier_part('*'));
        assert!(is_special_character('$'));
        assert!(is_identifier_part('$'));
    }

    #[test]
    fn test_start_classes() {
        assert!(is_constant_start('7'));
        assert!(is_constant_start('.'));
        assert!(is_constant_start('\''));
        assert!(is_identifier_start('"'));
        assert!(is_identifier_start('_'));
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('#'));
    }

    #[test]
    fn test_drop_and_alter_are_both_kinds() {
        for word in ["drop", "alter"] {
            assert!(is_keyword_of_interest(word));
            assert!(is_keyword_name(word));
        }
        assert!(!is_keyword_name("from"));
        assert!(is_keyword_name("("));
    }

    #[test]
    fn test_whitespace_is_single_characters() {
        assert!(is_whitespace('\r'));
        assert!(is_whitespace('\n'));
        assert!(!is_whitespace('\u{a0}'));
    }
}
