//! Pipeline module - dataset editing and feature statistics

pub mod column_key;
pub mod correlation;
pub mod dataset;
pub mod error;
pub mod fdr;
pub mod loader;
pub mod results;
pub mod session;
pub mod statistics;

pub use column_key::*;
pub use correlation::*;
pub use dataset::*;
pub use error::*;
pub use fdr::*;
pub use loader::*;
pub use results::*;
pub use session::*;
pub use statistics::*;
