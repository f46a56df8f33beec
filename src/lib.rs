//! `logswan` analyzes web server access logs in a single streaming pass.
//!
//! Each line is tokenized, classified and folded into fixed-size histograms,
//! while unique visitors are estimated with HyperLogLog, so memory usage stays
//! constant however large the input is.
pub mod aggregator;
pub mod classify;
pub mod date;
pub mod error;
pub mod estimator;
pub mod geo;
pub mod logging;
pub mod number;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod request;
pub mod sandbox;
pub mod tables;

pub use aggregator::{Aggregator, FileInfo, Results};
pub use error::{Error, NumberError, Result};
pub use estimator::CardinalityEstimator;
pub use pipeline::{analyze, Input};
