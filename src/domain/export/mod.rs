//! Export module - Rows, parameters, headers and run state of a CSV product
//! export.

mod export_row;
mod header;
mod job_parameters;
mod run_state;

pub use export_row::ExportRow;
pub use header::FlatHeader;
pub use job_parameters::{JobParameters, DEFAULT_DELIMITER, DEFAULT_ENCLOSURE};
pub use run_state::ExportRunState;
