//! Source discovery
//!
//! Resolves the paths given on the command line (or typed at the prompt) into
//! the SQL files to scan and reads them.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How directories are walked
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    /// Descend into subdirectories instead of scanning one level only
    pub recursive: bool,
    /// Only directory entries whose file name matches are scanned
    pub file_filter: Option<Regex>,
}

impl SourceOptions {
    fn accepts(&self, path: &Path) -> bool {
        let Some(filter) = &self.file_filter else {
            return true;
        };
        path.file_name()
            .map(|name| filter.is_match(&name.to_string_lossy()))
            .unwrap_or(false)
    }
}

/// One unit of work: a file and its contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub text: String,
}

impl Source {
    /// Reads a UTF-8 file
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        debug!(path = %path.display(), bytes = text.len(), "read source");

        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }
}

/// Lists the files to scan for `path`, in sorted order
///
/// A file is returned as is, even when it does not match the filter. A
/// directory yields its matching files. Symlinked files are scanned, symlinked
/// directories are skipped.
pub fn collect_files(path: &Path, options: &SourceOptions) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("{} is neither a file nor a directory", path.display());
    }

    let mut files = Vec::new();
    walk(path, options, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, options: &SourceOptions, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        // Unlike `Path::is_dir`, the entry's file type does not follow symlinks
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to inspect {}", path.display()))?;

        if path.is_file() {
            if options.accepts(&path) {
                files.push(path);
            } else {
                debug!(path = %path.display(), "file name does not match filter");
            }
        } else if file_type.is_dir() && options.recursive {
            walk(&path, options, files)?;
        } else {
            warn!(path = %path.display(), "skipping entry");
        }
    }
    Ok(())
}
