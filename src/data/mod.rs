//! Data acquisition: HTTP/file fetch and the bundled sample dataset.

pub mod fetch;
pub mod sample;

pub use fetch::DataSource;
