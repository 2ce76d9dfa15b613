//! Category Statistics
//!
//! Short statistics report only the element count. Full statistics add
//! sum/mean/min/max for numbers and shortest/longest for strings.
//!
//! Statistics only borrow the partition, so they never reorder the values
//! that are written to the output files.

use crate::aggregate::{Category, Partition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsMode {
    Short,
    Full,
}

impl StatsMode {
    fn title(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Full => "Full",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerStats {
    pub count: usize,
    /// Exact sum; wider than the values so it cannot overflow
    pub sum: i128,
    pub mean: f64,
    pub min: i64,
    pub max: i64,
}

impl IntegerStats {
    pub fn compute(values: &[i64]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
        let count = values.len();
        Some(Self {
            count,
            sum,
            mean: sum as f64 / count as f64,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl FloatStats {
    pub fn compute(values: &[f64]) -> Option<Self> {
        // total order so -0.0 sorts below 0.0
        let min = values.iter().copied().min_by(f64::total_cmp)?;
        let max = values.iter().copied().max_by(f64::total_cmp)?;
        let sum: f64 = values.iter().sum();
        let count = values.len();
        Some(Self {
            count,
            sum,
            mean: sum / count as f64,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringStats<'a> {
    pub count: usize,
    pub shortest: &'a str,
    pub longest: &'a str,
}

impl<'a> StringStats<'a> {
    /// Shortest is the first of minimal length, longest the last of maximal
    /// length, matching a stable sort by length.
    pub fn compute(values: &'a [String]) -> Option<Self> {
        let shortest = values.iter().min_by_key(|s| s.chars().count())?;
        let longest = values.iter().max_by_key(|s| s.chars().count())?;
        Some(Self {
            count: values.len(),
            shortest,
            longest,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryStats<'a> {
    Integer(IntegerStats),
    Float(FloatStats),
    Text(StringStats<'a>),
    Empty(Category),
}

impl<'a> CategoryStats<'a> {
    pub fn compute(category: Category, partition: &'a Partition) -> Self {
        let stats = match category {
            Category::Integer => IntegerStats::compute(&partition.integers).map(Self::Integer),
            Category::Float => FloatStats::compute(&partition.floats).map(Self::Float),
            Category::Text => StringStats::compute(&partition.strings).map(Self::Text),
        };
        stats.unwrap_or(Self::Empty(category))
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Integer(_) => Category::Integer,
            Self::Float(_) => Category::Float,
            Self::Text(_) => Category::Text,
            Self::Empty(category) => *category,
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Integer(s) => s.count,
            Self::Float(s) => s.count,
            Self::Text(s) => s.count,
            Self::Empty(_) => 0,
        }
    }

    /// Render one report line
    pub fn render(&self, mode: StatsMode) -> String {
        let label = self.category().label();
        if let Self::Empty(_) = self {
            return format!(
                "No {} statistics: no elements of this type were found in the input files.",
                label
            );
        }

        let head = format!("{} {} statistics: count = {}", mode.title(), label, self.count());
        if mode == StatsMode::Short {
            return head;
        }

        match self {
            Self::Integer(s) => format!(
                "{}; sum = {}; mean = {}; min = {}; max = {}",
                head,
                s.sum,
                format_decimal(s.mean, 0, 2),
                s.min,
                s.max
            ),
            // min/max stay unrounded
            Self::Float(s) => format!(
                "{}; sum = {}; mean = {}; min = {:?}; max = {:?}",
                head,
                format_decimal(s.sum, 2, 4),
                format_decimal(s.mean, 2, 4),
                s.min,
                s.max
            ),
            Self::Text(s) => format!(
                "{}; shortest = \"{}\"; longest = \"{}\"",
                head, s.shortest, s.longest
            ),
            Self::Empty(_) => head,
        }
    }
}

/// One report line per category, in write order
pub fn report(partition: &Partition, mode: StatsMode) -> Vec<String> {
    Category::ALL
        .iter()
        .map(|&category| CategoryStats::compute(category, partition).render(mode))
        .collect()
}

/// Format with at least `min_frac` and at most `max_frac` fractional digits,
/// dropping trailing zeros in between.
pub fn format_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    let mut text = format!("{:.*}", max_frac, value);

    if let Some(dot) = text.find('.') {
        let keep = dot + 1 + min_frac;
        while text.len() > keep && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }

    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text.remove(0);
    }
    text
}
