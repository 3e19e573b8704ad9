//! featstat: Feature Statistics Library
//!
//! An editable tabular dataset with a detached target column, and the
//! statistics used to rank its features: Fisher discriminant ratio, Pearson
//! redundancy and aggregate cross-correlation.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
