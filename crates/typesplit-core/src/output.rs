use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aggregate::Category;
use crate::error::{Result, TypesplitError};

/// Output directory plus optional filename prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub dir: PathBuf,
    pub prefix: String,
}

/// Resolved output file for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub category: Category,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Nothing to write; no file was created or modified
    Skipped,
    Written { lines: usize },
}

impl OutputLayout {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Fail unless the output directory exists and is a directory
    pub fn validate(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(TypesplitError::OutputDirectoryInvalid {
                path: self.dir.clone(),
            });
        }
        Ok(())
    }

    pub fn target(&self, category: Category) -> OutputTarget {
        let file_name = format!("{}{}", self.prefix, category.file_name());
        OutputTarget {
            category,
            path: self.dir.join(file_name),
        }
    }
}

/// Canonical single-line text of a written value
pub trait LineValue {
    fn write_line(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl LineValue for i64 {
    fn write_line(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self)
    }
}

impl LineValue for f64 {
    // Debug keeps a '.' or exponent, so a written float reads back as a float
    fn write_line(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{:?}", self)
    }
}

impl LineValue for String {
    fn write_line(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self)
    }
}

/// Write `values` to `target`, one per line.
///
/// Empty input is a no-op. In append mode the target must already exist.
pub fn write_values<T: LineValue>(
    values: &[T],
    target: &OutputTarget,
    append: bool,
) -> Result<WriteOutcome> {
    if values.is_empty() {
        debug!(category = %target.category, "no values, skipping write");
        return Ok(WriteOutcome::Skipped);
    }

    let file = open_target(&target.path, append)?;
    let mut writer = BufWriter::new(file);
    for value in values {
        value
            .write_line(&mut writer)
            .map_err(|e| write_error(&target.path, e))?;
    }
    writer.flush().map_err(|e| write_error(&target.path, e))?;

    debug!(
        category = %target.category,
        path = %target.path.display(),
        lines = values.len(),
        append,
        "wrote output file"
    );
    Ok(WriteOutcome::Written {
        lines: values.len(),
    })
}

fn open_target(path: &Path, append: bool) -> Result<File> {
    let opened = if append {
        // no create: append only ever extends an existing file
        OpenOptions::new().append(true).open(path)
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    };

    opened.map_err(|e| {
        if append && e.kind() == io::ErrorKind::NotFound {
            TypesplitError::AppendTargetMissing {
                path: path.to_path_buf(),
            }
        } else {
            write_error(path, e)
        }
    })
}

fn write_error(path: &Path, source: io::Error) -> TypesplitError {
    TypesplitError::WriteOutput {
        path: path.to_path_buf(),
        source,
    }
}
