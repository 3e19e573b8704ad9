//! Report module - rendering and exporting statistics results

pub mod export;
pub mod tables;

pub use export::*;
pub use tables::*;
