//! Boundary I/O: record files in, run document out.

pub mod reader;
pub mod writer;

pub use reader::{parse_records, read_records};
pub use writer::{to_json_pretty, write_report, write_report_file};
