// Adapters layer: turns the raw input files into typed records.

pub mod csv_reader;
