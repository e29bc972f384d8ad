//! Scans SQL text for the objects a statement refers to.
//!
//! The [`sql`] module holds the tokenizer and the reference extractor. The
//! [`source`] and [`report`] modules feed files into it and render what comes
//! out; the `sqlref` binary wires them to the command line.

pub mod report;
pub mod source;
pub mod sql;
