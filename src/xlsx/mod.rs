//! Excel adapters, available behind the `xlsx` feature: a workbook reader
//! that produces a [`SourceBook`](crate::source::SourceBook) and a
//! [`ReportSink`](crate::report::ReportSink) that renders report books to
//! `.xlsx` bytes.

pub mod read;
pub mod write;

pub use read::*;
pub use write::*;
