//! Reference extraction
//!
//! A single pass over the token stream that collects the runs of tokens
//! following a keyword of interest (`FROM`, `JOIN`, `INTO`, ...). A run ends
//! at the next structural keyword or at the end of the stream. No grammar is
//! involved, so the runs only approximate the objects a statement touches:
//!
//! ```text
//! select * from t1 join t2 on t1.id = t2.id
//!               ^^^^^^^^^^ [Identifier(t1), KeywordOfInterest(join), Identifier(t2)]
//! ```
//!
//! While a run is open, further keywords of interest are ordinary members of
//! it. `DROP` and `ALTER` are both keywords of interest and structural
//! keywords: they close the open run and start the next one.

pub mod expression;

use crate::sql::token::{Token, TokenKind};
use crate::sql::vocabulary;
use expression::Expression;
use std::ops::ControlFlow;
use tracing::{debug, trace};

#[derive(Debug)]
enum State {
    Scanning,
    Capturing(Expression),
}

/// Groups tokens into reference [`Expression`]s
#[derive(Debug)]
pub struct ReferenceExtractor {
    state: State,
    expressions: Vec<Expression>,
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self {
            state: State::Scanning,
            expressions: Vec::new(),
        }
    }

    /// Runs the extractor over `tokens`
    ///
    /// The stream is read up to its end-of-stream token; a stream without one
    /// is treated as if it ended after its last token.
    pub fn extract<I>(mut self, tokens: I) -> Vec<Expression>
    where
        I: IntoIterator<Item = Token>,
    {
        for token in std::iter::once(Token::start_of_stream()).chain(tokens) {
            if self.step(token).is_break() {
                break;
            }
        }
        self.finish()
    }

    fn step(&mut self, token: Token) -> ControlFlow<()> {
        if let State::Capturing(expression) = &mut self.state {
            if !is_boundary(&token) {
                expression.push(token);
                return ControlFlow::Continue(());
            }
            self.close_expression();
        }

        // Back in the scanning state; a boundary that just closed a run is
        // looked at again so DROP and ALTER can open the next one.
        match token.kind() {
            TokenKind::EndOfStream => ControlFlow::Break(()),
            TokenKind::KeywordOfInterest => {
                trace!(%token, "opening reference expression");
                self.state = State::Capturing(Expression::new());
                ControlFlow::Continue(())
            }
            _ => ControlFlow::Continue(()),
        }
    }

    fn close_expression(&mut self) {
        if let State::Capturing(expression) = std::mem::replace(&mut self.state, State::Scanning) {
            debug!(
                tokens = expression.len(),
                expression = %expression.compact(),
                "closed reference expression"
            );
            self.expressions.push(expression);
        }
    }

    fn finish(mut self) -> Vec<Expression> {
        self.close_expression();
        self.expressions
    }
}

fn is_boundary(token: &Token) -> bool {
    token.is_end_of_stream() || token.text().is_some_and(vocabulary::is_keyword_name)
}

/// Extracts the reference expressions of a token stream, in source order
pub fn extract_expressions<I>(tokens: I) -> Vec<Expression>
where
    I: IntoIterator<Item = Token>,
{
    ReferenceExtractor::new().extract(tokens)
}
