//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

/// vmlens - grouped memory/storage totals from a VM inventory CSV
///
/// Examples:
///   vmlens inventory.csv --group-by owner
///   vmlens inventory.csv --group-by purpose --online-only --metrics memory
///   vmlens inventory.csv --group-by purpose --owner bob --format json
///   vmlens inventory.csv --list-groups
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Inventory CSV export to load
    ///
    /// Must carry the columns name, power-state, memory-size and
    /// provisioned-storage (any order, extra columns ignored).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Dimension to group by: owner | purpose
    #[arg(short, long, value_name = "DIM", required_unless_present = "list_groups")]
    pub group_by: Option<String>,

    /// Metrics to sum (comma-separated): memory, storage
    #[arg(
        short,
        long,
        default_value = "memory,storage",
        value_name = "METRICS",
        value_delimiter = ','
    )]
    pub metrics: Vec<String>,

    /// Count only machines whose power state is "powered-on"
    #[arg(long)]
    pub online_only: bool,

    /// Restrict to one owner (breakdown queries)
    #[arg(long, value_name = "NAME")]
    pub owner: Option<String>,

    /// Restrict to one purpose (breakdown queries)
    #[arg(long, value_name = "NAME")]
    pub purpose: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Reject the whole file on the first malformed row instead of
    /// skipping bad rows with a warning
    #[arg(long)]
    pub strict: bool,

    /// List the distinct owners and purposes instead of aggregating
    #[arg(long)]
    pub list_groups: bool,
}

/// Output format for the result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table (default)
    #[default]
    Table,
    /// Chart-ready JSON: one (label, value) series per metric
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
