use std::fmt::Display;

/// Classification of a scanned token
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// Structural keywords that end a reference run (SELECT, WHERE, ON, ...)
    Keyword,
    /// Keywords that introduce a reference run (FROM, JOIN, INTO, ...)
    KeywordOfInterest,
    /// Table names, column names, qualified names like `schema.table.*`
    Identifier,
    /// Runs of operator characters such as `=` or `<>`
    Operator,
    /// Runs of punctuation such as `(`, `,` or `;`
    SpecialCharacter,
    /// Numeric and quoted string literals, kept verbatim
    Constant,
    /// Part of the vocabulary; the tokenizer errors out instead of producing it
    Unknown,
    /// Terminates every token sequence
    EndOfStream,
    /// Sentinel placed in front of a sequence by the extractor
    StartOfStream,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Keyword => "Keyword",
            TokenKind::KeywordOfInterest => "KeywordOfInterest",
            TokenKind::Identifier => "Identifier",
            TokenKind::Operator => "Operator",
            TokenKind::SpecialCharacter => "SpecialCharacter",
            TokenKind::Constant => "Constant",
            TokenKind::Unknown => "Unknown",
            TokenKind::EndOfStream => "EndOfStream",
            TokenKind::StartOfStream => "StartOfStream",
        };

        f.write_str(name)
    }
}

/// A single token produced by the tokenizer
///
/// Words (keywords and identifiers) are stored lowercased; constants and
/// operators keep the characters exactly as they appeared in the source.
/// The stream sentinels carry no text.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    kind: TokenKind,
    text: Option<String>,
    offset: Option<usize>,
}

impl Token {
    /// Creates a token covering `text`, which starts at byte `offset` of the source
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: Some(text.into()),
            offset: Some(offset),
        }
    }

    pub fn end_of_stream() -> Self {
        Self {
            kind: TokenKind::EndOfStream,
            text: None,
            offset: None,
        }
    }

    pub fn start_of_stream() -> Self {
        Self {
            kind: TokenKind::StartOfStream,
            text: None,
            offset: None,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The scanned text, `None` for the stream sentinels
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Byte offset of the first character of this token in the source
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}({})", self.kind, text),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Ordered tokens of one source text, always ending with exactly one
/// [`TokenKind::EndOfStream`] token
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Wraps scanned tokens; the last one must be the end-of-stream marker
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens.last().is_some_and(Token::is_end_of_stream));
        debug_assert_eq!(tokens.iter().filter(|t| t.is_end_of_stream()).count(), 1);
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of tokens, including the end-of-stream marker
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the source held nothing but whitespace
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }
}

impl IntoIterator for TokenSequence {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
