//! Run Pipeline
//!
//! Reads input files in order, classifies their lines, writes the three
//! output files and renders the requested statistics.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::aggregate::{Category, Partition};
use crate::error::{Result, TypesplitError};
use crate::output::{write_values, OutputLayout, OutputTarget, WriteOutcome};
use crate::stats::{report, StatsMode};

/// Callback for per-category write progress: (target, result)
pub type WriteCallback<'a> = Option<&'a dyn Fn(&OutputTarget, &Result<WriteOutcome>)>;

/// Immutable settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub layout: OutputLayout,
    pub append: bool,
    /// Statistics to print after writing, in order
    pub stats: Vec<StatsMode>,
}

/// Result of reading all input files
#[derive(Debug, Default)]
pub struct Ingested {
    pub partition: Partition,
    pub failures: Vec<TypesplitError>,
}

/// Result of writing one category
#[derive(Debug)]
pub struct CategoryWrite {
    pub target: OutputTarget,
    pub result: Result<WriteOutcome>,
}

#[derive(Debug)]
pub struct RunReport {
    pub partition: Partition,
    pub read_failures: Vec<TypesplitError>,
    pub writes: Vec<CategoryWrite>,
    pub stats: Vec<String>,
}

impl RunReport {
    /// All read and write errors, in the order they happened
    pub fn failures(&self) -> impl Iterator<Item = &TypesplitError> {
        self.read_failures
            .iter()
            .chain(self.writes.iter().filter_map(|w| w.result.as_ref().err()))
    }

    /// 0 on success, 2 if an append target was missing, otherwise the
    /// code of the first failure
    pub fn exit_code(&self) -> i32 {
        let mut code = 0;
        for failure in self.failures() {
            if let TypesplitError::AppendTargetMissing { .. } = failure {
                return failure.exit_code();
            }
            if code == 0 {
                code = failure.exit_code();
            }
        }
        code
    }
}

pub struct Pipeline {
    options: RunOptions,
}

impl Pipeline {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Read and classify every input file in order.
    ///
    /// A file that cannot be read completely contributes no values; the
    /// remaining files are still processed.
    pub fn ingest(&self, inputs: &[PathBuf]) -> Ingested {
        let mut ingested = Ingested::default();

        for path in inputs {
            match read_partition(path) {
                Ok(mut partition) => {
                    debug!(path = %path.display(), values = partition.len(), "read input file");
                    ingested.partition.append(&mut partition);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping input file");
                    ingested.failures.push(e);
                }
            }
        }

        ingested
    }

    /// Write each category to its own file.
    ///
    /// Categories are independent: a failure in one does not stop the others.
    pub fn write_all(
        &self,
        partition: &Partition,
        on_write: WriteCallback<'_>,
    ) -> Vec<CategoryWrite> {
        Category::ALL
            .iter()
            .map(|&category| {
                let target = self.options.layout.target(category);
                let append = self.options.append;
                let result = match category {
                    Category::Integer => write_values(&partition.integers, &target, append),
                    Category::Float => write_values(&partition.floats, &target, append),
                    Category::Text => write_values(&partition.strings, &target, append),
                };

                if let Err(e) = &result {
                    warn!(category = %category, error = %e, "write failed");
                }
                if let Some(f) = on_write {
                    f(&target, &result);
                }

                CategoryWrite { target, result }
            })
            .collect()
    }

    /// Report lines for every requested statistics mode
    pub fn statistics(&self, partition: &Partition) -> Vec<String> {
        self.options
            .stats
            .iter()
            .flat_map(|&mode| report(partition, mode))
            .collect()
    }

    /// Full run: validate output, ingest, write, then compute statistics
    pub fn run(&self, inputs: &[PathBuf], on_write: WriteCallback<'_>) -> Result<RunReport> {
        self.options.layout.validate()?;

        let Ingested {
            partition,
            failures,
        } = self.ingest(inputs);
        let writes = self.write_all(&partition, on_write);
        let stats = self.statistics(&partition);

        Ok(RunReport {
            partition,
            read_failures: failures,
            writes,
            stats,
        })
    }
}

/// Classify one file into its own partition
fn read_partition(path: &Path) -> Result<Partition> {
    let read_error = |source| TypesplitError::ReadInput {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut text = String::new();
    BufReader::new(file)
        .read_to_string(&mut text)
        .map_err(read_error)?;

    let mut partition = Partition::new();
    partition.ingest_text(&text);
    Ok(partition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    fn options(dir: &Path) -> RunOptions {
        RunOptions {
            layout: OutputLayout::new(dir, ""),
            append: false,
            stats: Vec::new(),
        }
    }

    fn write_inputs(temp: &TempDir) -> Vec<PathBuf> {
        let first = temp.path().join("in1.txt");
        let second = temp.path().join("in2.txt");
        fs::write(&first, "10\nfoo\n2.5\n").unwrap();
        fs::write(&second, "20\n\n   \nbar\n").unwrap();
        vec![first, second]
    }

    #[test]
    fn test_end_to_end_default_options() {
        let temp = TempDir::new().unwrap();
        let inputs = write_inputs(&temp);

        let report = Pipeline::new(options(temp.path())).run(&inputs, None).unwrap();

        assert_eq!(report.partition.integers, vec![10, 20]);
        assert_eq!(report.partition.floats, vec![2.5]);
        assert_eq!(report.partition.strings, vec!["foo", "bar"]);
        assert_eq!(report.exit_code(), 0);
        assert!(report.stats.is_empty());

        let ints = fs::read_to_string(temp.path().join("integers.txt")).unwrap();
        assert_eq!(ints, "10\n20\n");
        let floats = fs::read_to_string(temp.path().join("floats.txt")).unwrap();
        assert_eq!(floats, "2.5\n");
        let strings = fs::read_to_string(temp.path().join("strings.txt")).unwrap();
        assert_eq!(strings, "foo\nbar\n");
    }

    #[test]
    fn test_prefix_and_empty_category() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.txt");
        fs::write(&input, "1\n2\n").unwrap();

        let mut opts = options(temp.path());
        opts.layout.prefix = "p_".to_string();
        let report = Pipeline::new(opts).run(&[input], None).unwrap();

        assert_eq!(report.exit_code(), 0);
        assert!(temp.path().join("p_integers.txt").exists());
        assert!(!temp.path().join("p_floats.txt").exists());
        assert!(!temp.path().join("p_strings.txt").exists());
        assert!(matches!(report.writes[1].result, Ok(WriteOutcome::Skipped)));
    }

    #[test]
    fn test_rerun_overwrites() {
        let temp = TempDir::new().unwrap();
        let inputs = write_inputs(&temp);
        let pipeline = Pipeline::new(options(temp.path()));

        pipeline.run(&inputs, None).unwrap();
        pipeline.run(&inputs, None).unwrap();

        let ints = fs::read_to_string(temp.path().join("integers.txt")).unwrap();
        assert_eq!(ints, "10\n20\n");
    }

    #[test]
    fn test_append_missing_target_does_not_block_others() {
        let temp = TempDir::new().unwrap();
        let inputs = write_inputs(&temp);
        fs::write(temp.path().join("integers.txt"), "1\n").unwrap();
        fs::write(temp.path().join("strings.txt"), "old\n").unwrap();

        let mut opts = options(temp.path());
        opts.append = true;
        let report = Pipeline::new(opts).run(&inputs, None).unwrap();

        assert_eq!(report.exit_code(), 2);
        assert!(matches!(
            report.writes[1].result,
            Err(TypesplitError::AppendTargetMissing { .. })
        ));
        assert!(!temp.path().join("floats.txt").exists());

        let ints = fs::read_to_string(temp.path().join("integers.txt")).unwrap();
        assert_eq!(ints, "1\n10\n20\n");
        let strings = fs::read_to_string(temp.path().join("strings.txt")).unwrap();
        assert_eq!(strings, "old\nfoo\nbar\n");
    }

    #[test]
    fn test_unreadable_input_is_skipped() {
        let temp = TempDir::new().unwrap();
        let mut inputs = write_inputs(&temp);
        inputs.insert(1, temp.path().join("missing.txt"));

        let report = Pipeline::new(options(temp.path())).run(&inputs, None).unwrap();

        assert_eq!(report.read_failures.len(), 1);
        assert!(matches!(
            report.read_failures[0],
            TypesplitError::ReadInput { .. }
        ));
        assert_eq!(report.partition.integers, vec![10, 20]);
        assert_eq!(report.exit_code(), 4);
    }

    #[test]
    fn test_carriage_return_only_file() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("mac.txt");
        fs::write(&input, "a\rb\r7\r").unwrap();

        let ingested = Pipeline::new(options(temp.path())).ingest(&[input]);
        assert!(ingested.failures.is_empty());
        assert_eq!(ingested.partition.strings, vec!["a", "b"]);
        assert_eq!(ingested.partition.integers, vec![7]);
    }

    #[test]
    fn test_invalid_utf8_file_contributes_nothing() {
        let temp = TempDir::new().unwrap();
        let bad = temp.path().join("bad.txt");
        fs::write(&bad, b"5\n\xff\xfe\n6\n").unwrap();

        let ingested = Pipeline::new(options(temp.path())).ingest(&[bad]);
        assert!(ingested.partition.is_empty());
        assert_eq!(ingested.failures.len(), 1);
    }

    #[test]
    fn test_invalid_output_dir_fails_before_reading() {
        let temp = TempDir::new().unwrap();
        let inputs = write_inputs(&temp);

        let result = Pipeline::new(options(&temp.path().join("nope"))).run(&inputs, None);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_statistics_follow_requested_modes() {
        let temp = TempDir::new().unwrap();
        let inputs = write_inputs(&temp);

        let mut opts = options(temp.path());
        opts.stats = vec![StatsMode::Short, StatsMode::Full];
        let report = Pipeline::new(opts).run(&inputs, None).unwrap();

        assert_eq!(report.stats.len(), 6);
        assert_eq!(report.stats[0], "Short integer statistics: count = 2");
        assert!(report.stats[3].starts_with("Full integer statistics: count = 2; sum = 30"));
        assert_eq!(
            report.stats[5],
            "Full string statistics: count = 2; shortest = \"foo\"; longest = \"bar\""
        );
        assert_eq!(report.partition.strings, vec!["foo", "bar"]);
    }

    #[test]
    fn test_write_callback_sees_every_category() {
        let temp = TempDir::new().unwrap();
        let inputs = write_inputs(&temp);
        let seen = RefCell::new(Vec::new());

        let on_write = |target: &OutputTarget, result: &Result<WriteOutcome>| {
            seen.borrow_mut().push((target.category, result.is_ok()));
        };
        Pipeline::new(options(temp.path()))
            .run(&inputs, Some(&on_write))
            .unwrap();

        assert_eq!(
            seen.into_inner(),
            vec![
                (Category::Integer, true),
                (Category::Float, true),
                (Category::Text, true)
            ]
        );
    }
}
