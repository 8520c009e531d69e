//! Library side of the `sheetcheck` binary: the check pipeline, output
//! rendering, logging setup, and exit codes.

pub mod exit;
pub mod logging;
pub mod pipeline;
pub mod summary;
