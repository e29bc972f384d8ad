//! SQL Tokenizer
//!
//! Turns source text into a [`TokenSequence`]. The scanner looks at one
//! character at a token boundary, picks the first character class that
//! accepts it and lets that class consume a greedy run:
//!
//! 1. whitespace is skipped
//! 2. operator characters → [`TokenKind::Operator`]
//! 3. special characters → [`TokenKind::SpecialCharacter`]
//! 4. digits, `.` and `'` → [`TokenKind::Constant`]
//! 5. letters, `_` and `"` → keyword, keyword of interest or identifier
//!
//! Anything else at a boundary aborts the scan with a [`SyntaxError`].
//!
//! # Example
//! ```
//! use sqlref::sql::tokenizer::tokenize;
//!
//! let tokens = tokenize("SELECT a.col1 FROM table1").unwrap();
//! // Keyword(select) Identifier(a.col1) KeywordOfInterest(from) Identifier(table1) EndOfStream
//! assert_eq!(tokens.len(), 5);
//! ```

use super::token::{Token, TokenKind, TokenSequence};
use super::vocabulary;
use thiserror::Error;
use tracing::{debug, trace};

/// Raised when a token boundary starts with a character outside every class
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid syntax: unexpected character {character:?} at line {line}, column {column}")]
pub struct SyntaxError {
    pub character: char,
    /// Byte offset into the source
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    fn at(source: &str, offset: usize, character: char) -> Self {
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };

        Self {
            character,
            offset,
            line,
            column,
        }
    }
}

/// Scan position within the source text
#[derive(Debug, Clone, Copy)]
struct Cursor<'source> {
    source: &'source str,
    offset: usize,
}

impl<'source> Cursor<'source> {
    fn new(source: &'source str) -> Self {
        Self { source, offset: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    /// Consumes `c` if it is the current character
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.offset += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `predicate` holds and returns them
    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> &'source str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.offset += c.len_utf8();
        }
        &self.source[start..self.offset]
    }

    fn since(&self, start: usize) -> &'source str {
        &self.source[start..self.offset]
    }
}

type Handler = for<'a> fn(&mut Cursor<'a>) -> Token;

/// Character classes in priority order. The first predicate that accepts the
/// boundary character decides which handler consumes the run.
const RULES: &[(fn(char) -> bool, Handler)] = &[
    (vocabulary::is_operator, scan_operator),
    (vocabulary::is_special_character, scan_special_character),
    (vocabulary::is_constant_start, scan_constant),
    (vocabulary::is_identifier_start, scan_word),
];

fn scan_operator(cursor: &mut Cursor<'_>) -> Token {
    let offset = cursor.offset;
    let op = cursor.eat_while(vocabulary::is_operator);
    Token::new(TokenKind::Operator, op, offset)
}

fn scan_special_character(cursor: &mut Cursor<'_>) -> Token {
    let offset = cursor.offset;
    let sc = cursor.eat_while(vocabulary::is_special_character);
    Token::new(TokenKind::SpecialCharacter, sc, offset)
}

fn scan_constant(cursor: &mut Cursor<'_>) -> Token {
    let offset = cursor.offset;
    if cursor.eat(vocabulary::STRING_DELIMITER) {
        // No escapes. An unterminated literal runs to the end of the text.
        cursor.eat_while(|c| c != vocabulary::STRING_DELIMITER);
        cursor.eat(vocabulary::STRING_DELIMITER);
    } else {
        cursor.eat_while(|c| !vocabulary::is_whitespace(c));
    }
    Token::new(TokenKind::Constant, cursor.since(offset), offset)
}

fn scan_word(cursor: &mut Cursor<'_>) -> Token {
    let offset = cursor.offset;
    let word = cursor
        .eat_while(vocabulary::is_identifier_part)
        .to_ascii_lowercase();

    let kind = if vocabulary::is_keyword_of_interest(&word) {
        TokenKind::KeywordOfInterest
    } else if vocabulary::is_keyword_name(&word) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    };
    Token::new(kind, word, offset)
}

/// Streaming view of the scanner
///
/// Yields each token in order, then the end-of-stream token, then `None`.
/// After a [`SyntaxError`] the iterator is exhausted.
pub struct Tokenizer<'source> {
    cursor: Cursor<'source>,
    finished: bool,
}

impl<'source> Tokenizer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            cursor: Cursor::new(source),
            finished: false,
        }
    }

    fn scan(&mut self) -> Result<Token, SyntaxError> {
        self.cursor.eat_while(vocabulary::is_whitespace);

        let Some(c) = self.cursor.peek() else {
            return Ok(Token::end_of_stream());
        };

        let (_, handler) = RULES
            .iter()
            .find(|(accepts, _)| accepts(c))
            .ok_or_else(|| SyntaxError::at(self.cursor.source, self.cursor.offset, c))?;

        Ok(handler(&mut self.cursor))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.scan();
        match &result {
            Ok(token) if token.is_end_of_stream() => self.finished = true,
            Ok(token) => trace!(%token, "scanned token"),
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

/// Scans `source` into a token sequence ending with one end-of-stream token
///
/// Fails on the first character that starts no known token class; no partial
/// sequence is returned.
pub fn tokenize(source: &str) -> Result<TokenSequence, SyntaxError> {
    let tokens = Tokenizer::new(source).collect::<Result<Vec<_>, _>>()?;
    debug!(tokens = tokens.len(), bytes = source.len(), "tokenized source");
    Ok(TokenSequence::new(tokens))
}
