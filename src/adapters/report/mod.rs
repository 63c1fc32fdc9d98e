//! Report Adapters
//!
//! - **FileReportWriter** - Stores the screening report as YAML on disk

mod file_report_writer;

pub use file_report_writer::FileReportWriter;
