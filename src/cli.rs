use anyhow::{anyhow, Result};
use clap::Parser;
use regex::Regex;
use sqlref::report::Reporter;
use sqlref::source::{collect_files, Source, SourceOptions};
use sqlref::sql::Expression;
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use tracing::{error, info};

/// Command line arguments for sqlref
#[derive(Debug, Parser)]
#[command(
    name = "sqlref",
    version,
    about = "Lists the tables and objects referenced by SQL statements"
)]
pub struct Args {
    /// Files or directories to scan; starts a prompt when omitted
    pub paths: Vec<PathBuf>,

    /// Scan this statement instead of files
    #[arg(short = 'e', long = "sql", conflicts_with = "paths")]
    pub sql: Option<String>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Only scan directory entries whose file name matches this regex
    #[arg(short = 'm', long = "match", value_name = "REGEX")]
    pub file_filter: Option<Regex>,

    /// Print the token stream before the expressions
    #[arg(long)]
    pub tokens: bool,
}

impl Args {
    fn source_options(&self) -> SourceOptions {
        SourceOptions {
            recursive: self.recursive,
            file_filter: self.file_filter.clone(),
        }
    }
}

/// Outcome of scanning one path
#[derive(Debug, Default)]
struct Summary {
    scanned: usize,
    failed: usize,
    expressions: Vec<Expression>,
}

struct Session<W: Write> {
    reporter: Reporter<W>,
    options: SourceOptions,
}

impl<W: Write> Session<W> {
    fn new(out: W, args: &Args) -> Self {
        Self {
            reporter: Reporter::new(out).with_tokens(args.tokens),
            options: args.source_options(),
        }
    }

    /// Scans every file under `path`; failures are logged and counted
    fn scan_path(&mut self, path: &Path) -> Summary {
        let mut summary = Summary::default();
        let files = match collect_files(path, &self.options) {
            Ok(files) => files,
            Err(err) => {
                error!("{err:#}");
                summary.failed += 1;
                return summary;
            }
        };
        info!(path = %path.display(), files = files.len(), "scanning");

        for file in files {
            let result = Source::read(&file).and_then(|source| {
                self.reporter
                    .report(&source.path.display().to_string(), &source.text)
            });
            match result {
                Ok(expressions) => {
                    summary.scanned += 1;
                    summary.expressions.extend(expressions);
                }
                Err(err) => {
                    error!("{err:#}");
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

pub struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Reads one line; returns false at end of input
    pub fn read_input(&mut self, input: &mut impl BufRead) -> Result<bool> {
        self.buffer.clear();
        let read = input.read_line(&mut self.buffer)?;
        self.buffer = self.buffer.trim().to_string();
        Ok(read > 0)
    }
}

pub fn print_prompt(out: &mut impl Write) -> Result<()> {
    write!(out, "folder location> ")?;
    out.flush()?;
    Ok(())
}

/// Prompts for paths until `.exit` or end of input, printing a summary per path
pub fn repl_mode<R: BufRead, W: Write>(args: &Args, mut input: R, out: W) -> Result<()> {
    let mut session = Session::new(out, args);
    let mut input_buffer = InputBuffer::new();

    loop {
        print_prompt(session.reporter.get_mut())?;
        if !input_buffer.read_input(&mut input)? {
            writeln!(session.reporter.get_mut())?;
            break Ok(());
        }

        match input_buffer.buffer.as_str() {
            ".exit" => break Ok(()),
            "" => continue,
            location => {
                let summary = session.scan_path(Path::new(location));
                session
                    .reporter
                    .summarize(summary.scanned, summary.failed, &summary.expressions)?;
            }
        }
    }
}

pub fn execute_command(args: Args) -> Result<()> {
    if let Some(sql) = &args.sql {
        let mut reporter = Reporter::new(io::stdout()).with_tokens(args.tokens);
        reporter.report("<inline>", sql)?;
        return Ok(());
    }

    if args.paths.is_empty() {
        return repl_mode(&args, io::stdin().lock(), io::stdout());
    }

    let mut session = Session::new(io::stdout(), &args);
    let (mut scanned, mut failed) = (0, 0);
    for path in &args.paths {
        let summary = session.scan_path(path);
        scanned += summary.scanned;
        failed += summary.failed;
    }

    info!(scanned, failed, "done");
    if failed > 0 {
        return Err(anyhow!("{failed} source(s) could not be scanned"));
    }
    Ok(())
}
