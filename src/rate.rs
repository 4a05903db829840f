//! Requests started per second, sampled every tick
//!
//! Unlike the active count this looks at start times only: each tick `d`
//! counts the requests starting in `[d, d + step)`, whatever their status.

use chrono::TimeDelta;

use crate::config::ConverterConfig;
use crate::dat_output::DatRow;
use crate::error::Result;
use crate::timeline::Timeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRow {
    pub offset_ms: i64,
    pub started: u64,
}

impl DatRow for RateRow {
    const HEADER: &'static str = "# offset (ms), requests started";

    fn fields(&self) -> Vec<i64> {
        vec![self.offset_ms, self.started as i64]
    }
}

/// Count requests starting in each window from the origin to the latest end
///
/// Rows are computed lazily, one per tick.
pub fn sliding_rate<'a>(
    timeline: &'a Timeline,
    config: &ConverterConfig,
) -> Result<impl Iterator<Item = RateRow> + 'a> {
    let step = config.tick()?;
    let max_end = timeline.max_end();

    tracing::debug!(
        max_end_ms = max_end.num_milliseconds(),
        step_ms = step.num_milliseconds(),
        "sampling request rate"
    );

    let ticks = std::iter::successors(Some(TimeDelta::zero()), move |tick| {
        tick.checked_add(&step)
    })
    .take_while(move |tick| *tick <= max_end);

    Ok(ticks.map(move |tick| {
        let window_end = tick + step;
        let started = timeline
            .records()
            .iter()
            .filter(|record| record.start >= tick && record.start < window_end)
            .count() as u64;

        RateRow {
            offset_ms: tick.num_milliseconds(),
            started,
        }
    }))
}
