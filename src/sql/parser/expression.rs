use crate::sql::token::Token;
use itertools::Itertools;
use std::fmt::Display;

/// Tokens captured after a keyword of interest, up to the next structural keyword
///
/// For `SELECT * FROM orders o WHERE ...` the expression is `[orders, o]`.
/// Neither the introducing keyword nor the terminating one is included.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token texts joined by single spaces, e.g. `t1 join t2`
    pub fn compact(&self) -> String {
        self.tokens.iter().filter_map(Token::text).join(" ")
    }
}

impl From<Vec<Token>> for Expression {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.tokens.iter().format(", "))
    }
}
