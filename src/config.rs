//! Fixed per-variant converter configuration
//!
//! Each converter variant runs with a fixed set of parameters. They are kept in
//! one serializable struct instead of being scattered as literals so that the
//! aggregators receive them explicitly.

use chrono::TimeDelta;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{ReqplotError, Result};

/// Converter variant, one per gnuplot data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Active successful requests sampled every 100ms
    Active,
    /// Active successful requests sampled every second
    ActiveCoarse,
    /// Successful requests packed into non-overlapping lanes
    Intervals,
    /// All requests packed into lanes, failures on lane 0, with status column
    IntervalsStatus,
    /// Issued and succeeded requests per one-second bucket
    Throughput,
    /// Requests started per second, sampled every second
    Rate,
}

impl Variant {
    /// Whether every record must carry a `status` field
    pub fn requires_status(self) -> bool {
        !matches!(self, Variant::Rate)
    }
}

/// Parameters of a single converter run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConverterConfig {
    pub variant: Variant,

    /// Sampling step (milliseconds); `None` for variants that do not sample
    pub tick_ms: Option<i64>,

    /// Status code counted as a successful request
    ///
    /// The test server answers 204 No Content to every accepted request.
    pub success_status: u16,

    /// Inclusive status range that claims a lane in the status-aware variant
    pub lane_status_range: (u16, u16),

    /// Minimum rendered duration of an interval (milliseconds)
    pub min_rendered_ms: i64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Active,
            tick_ms: Some(100),
            success_status: 204,
            lane_status_range: (200, 299),
            min_rendered_ms: 1,
        }
    }
}

impl ConverterConfig {
    /// Configuration used by the given variant
    pub fn for_variant(variant: Variant) -> Self {
        let tick_ms = match variant {
            Variant::Active => Some(100),
            Variant::ActiveCoarse | Variant::Rate => Some(1000),
            Variant::Intervals | Variant::IntervalsStatus | Variant::Throughput => None,
        };

        Self {
            variant,
            tick_ms,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(tick_ms) = self.tick_ms.filter(|&ms| ms <= 0) {
            return Err(ReqplotError::Configuration(format!(
                "tick_ms must be > 0, got {}",
                tick_ms
            )));
        }

        let (low, high) = self.lane_status_range;
        if low > high {
            return Err(ReqplotError::Configuration(format!(
                "lane_status_range is empty: {}..={}",
                low, high
            )));
        }

        if self.min_rendered_ms < 0 {
            return Err(ReqplotError::Configuration(format!(
                "min_rendered_ms must be >= 0, got {}",
                self.min_rendered_ms
            )));
        }

        Ok(())
    }

    /// Sampling step as a time delta
    pub fn tick(&self) -> Result<TimeDelta> {
        self.tick_ms.map(TimeDelta::milliseconds).ok_or_else(|| {
            ReqplotError::Configuration(format!(
                "variant {:?} has no sampling step",
                self.variant
            ))
        })
    }

    /// Minimum rendered duration as a time delta
    pub fn min_rendered(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.min_rendered_ms)
    }

    pub fn is_success(&self, status: Option<u16>) -> bool {
        status == Some(self.success_status)
    }

    /// Whether a record with this status claims a lane (status-aware variant)
    pub fn claims_lane(&self, status: Option<u16>) -> bool {
        let (low, high) = self.lane_status_range;
        status.is_some_and(|s| (low..=high).contains(&s))
    }
}
