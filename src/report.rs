//! Rendering of scan results
//!
//! For every source the reporter prints a `FILE NAME:` header followed by one
//! line per reference expression:
//!
//! ```text
//! FILE NAME: queries/orders.sql
//!
//! [Identifier(orders), Identifier(o)]
//! [Identifier(customers)]
//! ```

use crate::sql::{extract_expressions, tokenize, Expression, TokenSequence};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;

/// Writes scan results for a series of sources
pub struct Reporter<W: Write> {
    out: W,
    show_tokens: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_tokens: false,
        }
    }

    /// Also print the token stream of each source before its expressions
    pub fn with_tokens(mut self, show_tokens: bool) -> Self {
        self.show_tokens = show_tokens;
        self
    }

    /// Scans `text` and prints what was found under the `label` header
    ///
    /// Nothing is printed when the text does not tokenize.
    pub fn report(&mut self, label: &str, text: &str) -> Result<Vec<Expression>> {
        let tokens = tokenize(text).with_context(|| format!("failed to scan {label}"))?;

        writeln!(self.out, "\nFILE NAME: {label}\n")?;
        if self.show_tokens {
            self.write_tokens(&tokens)?;
        }

        let expressions = extract_expressions(tokens);
        for expression in &expressions {
            writeln!(self.out, "{expression}")?;
        }
        self.out.flush()?;

        info!(source = label, expressions = expressions.len(), "scanned source");
        Ok(expressions)
    }

    fn write_tokens(&mut self, tokens: &TokenSequence) -> Result<()> {
        for token in tokens {
            writeln!(self.out, "{token}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Prints the totals of one batch and each non-empty expression on one line
    ///
    /// ```text
    /// 2 file(s) scanned, 0 failed
    ///   sales.orders o join sales.customers c
    ///   audit.log
    /// ```
    pub fn summarize(
        &mut self,
        scanned: usize,
        failed: usize,
        expressions: &[Expression],
    ) -> Result<()> {
        writeln!(self.out, "\n{scanned} file(s) scanned, {failed} failed")?;
        for expression in expressions.iter().filter(|e| !e.is_empty()) {
            writeln!(self.out, "  {}", expression.compact())?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str, show_tokens: bool) -> Result<String> {
        let mut reporter = Reporter::new(Vec::new()).with_tokens(show_tokens);
        reporter.report("inline", text)?;
        Ok(String::from_utf8(reporter.into_inner())?)
    }

    #[test]
    fn test_report_expressions() -> Result<()> {
        let output = render("select * from t1 join t2 on t1.id = t2.id", false)?;

        assert_eq!(
            output,
            "\nFILE NAME: inline\n\n[Identifier(t1), KeywordOfInterest(join), Identifier(t2)]\n"
        );
        Ok(())
    }

    #[test]
    fn test_report_with_tokens() -> Result<()> {
        let output = render("select x from t", true)?;

        assert_eq!(
            output,
            "\nFILE NAME: inline\n\n\
             Keyword(select)\n\
             Identifier(x)\n\
             KeywordOfInterest(from)\n\
             Identifier(t)\n\
             EndOfStream\n\
             \n\
             [Identifier(t)]\n"
        );
        Ok(())
    }

    #[test]
    fn test_summary_lists_compact_expressions() -> Result<()> {
        let mut reporter = Reporter::new(Vec::new());
        let expressions =
            crate::sql::scan("select * from a.t1 x join t2 on x.id = 1; delete from")?;
        reporter.summarize(1, 2, &expressions)?;

        assert_eq!(
            String::from_utf8(reporter.into_inner())?,
            "\n1 file(s) scanned, 2 failed\n  a.t1 x join t2\n"
        );
        Ok(())
    }

    #[test]
    fn test_failed_scan_prints_nothing() {
        let mut reporter = Reporter::new(Vec::new());
        let err = reporter.report("broken.sql", "select # from t").unwrap_err();

        assert_eq!(err.to_string(), "failed to scan broken.sql");
        assert!(err.root_cause().to_string().contains("unexpected character '#'"));
        assert!(reporter.into_inner().is_empty());
    }
}
