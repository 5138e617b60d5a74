//! Output handling: result sinks and report formatting

pub mod formatter;
pub mod sink;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use sink::{BlobResultSink, ResultLayout, ResultSink, StoredResult};
