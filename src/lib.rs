//! Scoring, filtering and ranking for ABUS model score datasets.
//!
//! A dataset maps model names to weighted categories of scored subfeatures.
//! [`engine`] holds the pure computations; [`dataset`] loads, checks and
//! edits datasets; [`report`] renders results for the command line.

pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod report;
pub mod types;
