use anyhow::Result;
use regex::Regex;
use sqlref::report::Reporter;
use sqlref::source::{collect_files, Source, SourceOptions};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_directory_is_listed_sorted_and_flat() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("b.sql"), "select * from b")?;
    fs::write(dir.path().join("a.sql"), "select * from a")?;
    fs::create_dir(dir.path().join("nested"))?;
    fs::write(dir.path().join("nested").join("c.sql"), "select * from c")?;

    let files = collect_files(dir.path(), &SourceOptions::default())?;
    assert_eq!(
        files,
        vec![dir.path().join("a.sql"), dir.path().join("b.sql")]
    );

    let options = SourceOptions {
        recursive: true,
        ..SourceOptions::default()
    };
    let files = collect_files(dir.path(), &options)?;
    assert_eq!(files.len(), 3);
    assert!(files.contains(&dir.path().join("nested").join("c.sql")));
    Ok(())
}

#[test]
fn test_filter_applies_to_directory_entries_only() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("query.sql"), "select * from q")?;
    fs::write(dir.path().join("notes.txt"), "not sql")?;

    let options = SourceOptions {
        recursive: false,
        file_filter: Some(Regex::new(r"\.sql$")?),
    };
    assert_eq!(
        collect_files(dir.path(), &options)?,
        vec![dir.path().join("query.sql")]
    );

    let notes = dir.path().join("notes.txt");
    assert_eq!(collect_files(&notes, &options)?, vec![notes]);
    Ok(())
}

#[test]
fn test_read_and_report_files() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("orders.sql");
    fs::write(
        &path,
        "SELECT o.id\nFROM sales.orders o\nJOIN sales.customers c ON c.id = o.customer_id\n",
    )?;

    let source = Source::read(&path)?;
    let mut reporter = Reporter::new(Vec::new());
    let expressions = reporter.report("orders.sql", &source.text)?;

    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].compact(), "sales.orders o join sales.customers c");

    let output = String::from_utf8(reporter.into_inner())?;
    assert!(output.starts_with("\nFILE NAME: orders.sql\n\n"));
    Ok(())
}

#[test]
fn test_unreadable_source_names_the_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("binary.sql");
    fs::write(&path, [0xff, 0xfe, 0x00])?;

    let err = Source::read(&path).unwrap_err();
    assert!(err.to_string().contains("binary.sql"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_recursive_walk_skips_symlinked_directories() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.sql"), "select * from a")?;
    std::os::unix::fs::symlink(dir.path(), dir.path().join("loop"))?;

    let options = SourceOptions {
        recursive: true,
        ..SourceOptions::default()
    };
    let files = collect_files(dir.path(), &options)?;

    assert_eq!(files, vec![dir.path().join("a.sql")]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_files_are_scanned() -> Result<()> {
    let dir = tempdir()?;
    let target = tempdir()?;
    fs::write(target.path().join("b.sql"), "select * from b")?;
    std::os::unix::fs::symlink(target.path().join("b.sql"), dir.path().join("b.sql"))?;

    let files = collect_files(dir.path(), &SourceOptions::default())?;

    assert_eq!(files, vec![dir.path().join("b.sql")]);
    Ok(())
}
