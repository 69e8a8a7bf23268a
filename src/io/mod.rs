//! CSV input (ingest) and output (export).

pub mod export;
pub mod ingest;
