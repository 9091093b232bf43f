//! Output formatting for resolved subnets and conflict results.
//!
//! - [`csv`] - CSV output, one row per catalog block
//! - [`terminal`] - Terminal output with colors

mod csv;
mod terminal;

pub use csv::{block_rows, conflict_csv, print_conflicts_csv, CSV_HEADER};
pub use terminal::{
    descriptor_lines, format_field, print_descriptor, print_summary, summary_lines,
};
