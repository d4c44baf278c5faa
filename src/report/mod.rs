//! Report renderers for scan results.
//!
//! - [`terminal`]: colored progress lines, a table of blocked packages and a
//!   summary line; respects `--quiet`.
//! - [`json`]: the full [`ScanSummary`](crate::scan::ScanSummary) as JSON.

pub mod json;
pub mod terminal;
