//! Utility modules for identifiers and date labels.
//!
//! # Modules
//!
//! - [`ids`]: ID normalization
//! - [`dates`]: ISO date parsing and display labels

pub mod dates;
pub mod ids;
