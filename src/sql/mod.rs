//! SQL reference scanning
//!
//! Two passes over a statement: the [`tokenizer`] turns text into tokens and
//! the [`parser`] groups the tokens that follow `FROM`, `JOIN`, `INTO` and
//! friends into reference expressions.
//!
//! # Example
//! ```
//! let expressions = sqlref::sql::scan("select * from t1 join t2 on t1.id = t2.id").unwrap();
//! assert_eq!(expressions.len(), 1);
//! assert_eq!(expressions[0].compact(), "t1 join t2");
//! ```

pub mod parser;
pub mod token;
pub mod tokenizer;
pub mod vocabulary;

pub use parser::expression::Expression;
pub use parser::{extract_expressions, ReferenceExtractor};
pub use token::{Token, TokenKind, TokenSequence};
pub use tokenizer::{tokenize, SyntaxError, Tokenizer};

/// Tokenizes `source` and extracts its reference expressions
pub fn scan(source: &str) -> Result<Vec<Expression>, SyntaxError> {
    Ok(extract_expressions(tokenize(source)?))
}
