//! reqplot - gnuplot data from HTTP test server summaries
//!
//! This library turns the JSON activity summary of a load-test run into
//! comma-separated time series: active requests over time, per-request
//! timeline lanes, and request throughput per second.

pub mod active;
pub mod cli;
pub mod config;
pub mod converter;
pub mod dat_output;
pub mod error;
pub mod lanes;
pub mod rate;
pub mod summary;
pub mod throughput;
pub mod timeline;
