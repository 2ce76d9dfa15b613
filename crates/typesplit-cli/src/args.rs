use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use typesplit_core::Overrides;

#[derive(Parser, Debug)]
#[command(name = "typesplit")]
#[command(about = "Split text files into integers, floats and strings")]
#[command(version)]
pub struct Cli {
    /// Input files, read in the given order
    #[arg(value_name = "FILE", required_unless_present_any = ["completions", "init_config"])]
    pub files: Vec<PathBuf>,

    /// Output directory (default: current directory)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Prefix for output file names
    #[arg(short, long, allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Append to existing output files
    #[arg(short, long)]
    pub append: bool,

    /// Print short statistics
    #[arg(short = 's', long = "short-stats")]
    pub short_stats: bool,

    /// Print full statistics
    #[arg(short = 'f', long = "full-stats")]
    pub full_stats: bool,

    /// Config file (default: $TYPESPLIT_CONFIG or the user config dir)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a commented config template to PATH and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output_dir: self.output_dir.clone(),
            prefix: self.prefix.clone(),
            append: self.append,
            short_stats: self.short_stats,
            full_stats: self.full_stats,
        }
    }
}
