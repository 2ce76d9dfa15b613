//! Value Aggregation
//!
//! Collects classified values into three insertion-ordered sequences.

use std::fmt;

use crate::classify::{classify, ClassifiedValue};

/// Output category of a classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Integer,
    Float,
    Text,
}

impl Category {
    /// All categories in write/report order
    pub const ALL: [Category; 3] = [Category::Integer, Category::Float, Category::Text];

    /// Fixed output file suffix
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Integer => "integers.txt",
            Self::Float => "floats.txt",
            Self::Text => "strings.txt",
        }
    }

    /// Human-readable type name
    pub fn label(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "string",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classified values split by category, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub integers: Vec<i64>,
    pub floats: Vec<f64>,
    pub strings: Vec<String>,
}

impl Partition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one value to its category
    pub fn push(&mut self, value: ClassifiedValue) {
        match value {
            ClassifiedValue::Integer(v) => self.integers.push(v),
            ClassifiedValue::Float(v) => self.floats.push(v),
            ClassifiedValue::Text(v) => self.strings.push(v),
        }
    }

    /// Trim, skip blank, classify and append a raw input line.
    ///
    /// Returns false when the line was blank.
    pub fn ingest_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.push(classify(trimmed));
        true
    }

    /// Ingest every line of a text block.
    ///
    /// `\n`, `\r\n` and a bare `\r` all end a line.
    pub fn ingest_text(&mut self, text: &str) {
        // "\r\n" yields an extra empty piece, which is blank and skipped
        for line in text.split(['\n', '\r']) {
            self.ingest_line(line);
        }
    }

    /// Move all values of `other` after the values already held
    pub fn append(&mut self, other: &mut Partition) {
        self.integers.append(&mut other.integers);
        self.floats.append(&mut other.floats);
        self.strings.append(&mut other.strings);
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Integer => self.integers.len(),
            Category::Float => self.floats.len(),
            Category::Text => self.strings.len(),
        }
    }

    /// Total number of values across all categories
    pub fn len(&self) -> usize {
        self.integers.len() + self.floats.len() + self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<ClassifiedValue> for Partition {
    fn extend<I: IntoIterator<Item = ClassifiedValue>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<ClassifiedValue> for Partition {
    fn from_iter<I: IntoIterator<Item = ClassifiedValue>>(iter: I) -> Self {
        let mut partition = Self::new();
        partition.extend(iter);
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let partition: Partition = ["10", "foo", "2.5", "20", "bar"]
            .into_iter()
            .map(classify)
            .collect();

        assert_eq!(partition.integers, vec![10, 20]);
        assert_eq!(partition.floats, vec![2.5]);
        assert_eq!(partition.strings, vec!["foo", "bar"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut partition = Partition::new();
        assert!(!partition.ingest_line("   "));
        assert!(!partition.ingest_line(""));
        assert!(!partition.ingest_line("\t"));
        assert!(partition.ingest_line("  7  "));

        assert_eq!(partition.integers, vec![7]);
        assert_eq!(partition.len(), 1);
    }

    #[test]
    fn test_partition_counts_every_non_blank_line() {
        let text = "1\n\n  hello world \n2.0\n   \n-3\nx\n1e5\n";
        let mut partition = Partition::new();
        partition.ingest_text(text);

        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(partition.len(), non_blank);
        assert_eq!(partition.count(Category::Integer), 2);
        assert_eq!(partition.count(Category::Float), 2);
        assert_eq!(partition.count(Category::Text), 2);
        assert_eq!(partition.strings[0], "hello world");
    }

    #[test]
    fn test_line_endings() {
        let mut partition = Partition::new();
        partition.ingest_text("a\rb\rc\n1\r\n2\r\n\r\n2.5");

        assert_eq!(partition.strings, vec!["a", "b", "c"]);
        assert_eq!(partition.integers, vec![1, 2]);
        assert_eq!(partition.floats, vec![2.5]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut partition = Partition::new();
        partition.ingest_text("5\n5\n5\n");
        assert_eq!(partition.integers, vec![5, 5, 5]);
    }

    #[test]
    fn test_append_concatenates_in_order() {
        let mut first = Partition::new();
        first.ingest_text("10\nfoo\n2.5\n");
        let mut second = Partition::new();
        second.ingest_text("20\nbar\n");

        first.append(&mut second);
        assert_eq!(first.integers, vec![10, 20]);
        assert_eq!(first.strings, vec!["foo", "bar"]);
        assert!(second.is_empty());
    }

    #[test]
    fn test_category_file_names() {
        assert_eq!(Category::Integer.file_name(), "integers.txt");
        assert_eq!(Category::Float.file_name(), "floats.txt");
        assert_eq!(Category::Text.file_name(), "strings.txt");
        assert_eq!(Category::Text.to_string(), "string");
    }
}
