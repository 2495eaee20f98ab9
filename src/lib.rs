//! Series statistics and tabular data.
//!
//! The core entry point is [`stats::mean`]; [`series::Series`] exposes it as a
//! method next to frequency and probability estimates, and
//! [`frame::DataFrame`] stores named columns of values.

pub mod config;
pub mod frame;
pub mod model;
pub mod series;
pub mod stats;
