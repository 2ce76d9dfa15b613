pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod stats;

pub use aggregate::{Category, Partition};
pub use classify::{classify, try_parse_float, try_parse_integer, ClassifiedValue};
pub use config::{Config, Overrides, CONFIG_ENV};
pub use error::{Result, TypesplitError};
pub use output::{write_values, LineValue, OutputLayout, OutputTarget, WriteOutcome};
pub use pipeline::{
    CategoryWrite, Ingested, Pipeline, RunOptions, RunReport, WriteCallback,
};
pub use stats::{
    format_decimal, report, CategoryStats, FloatStats, IntegerStats, StatsMode, StringStats,
};
