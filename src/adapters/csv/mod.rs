//! CSV adapters - `FlatFileWriter` on the local filesystem.

mod csv_file_writer;

pub use csv_file_writer::CsvFileWriter;
