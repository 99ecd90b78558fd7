//! Display formatting for terminal output
//!
//! Formats validated bucket sets for the `check` command.

pub mod buckets;

pub use buckets::format_bucket_list;
