//! Error types for the FDC3 protocol layer.

mod transport;

pub use transport::*;
