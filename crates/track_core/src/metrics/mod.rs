//! # Metrics Module
//!
//! Descriptive team metrics over tracked positions.
//!
//! - `shape` - Team shape metrics (centroid, length, width)

pub mod shape;

pub use shape::*;
