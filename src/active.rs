//! Active successful requests sampled at fixed ticks
//!
//! A request is active at tick `t` when `start < t < end`; requests bordering
//! a tick exactly are not counted.

use chrono::TimeDelta;

use crate::config::ConverterConfig;
use crate::dat_output::DatRow;
use crate::error::{ReqplotError, Result};
use crate::timeline::{NormalizedRecord, Timeline};

/// Number of active requests at one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRow {
    pub offset_ms: i64,
    pub active: u64,
}

impl DatRow for ActiveRow {
    const HEADER: &'static str = "# offset (ms), active requests";

    fn fields(&self) -> Vec<i64> {
        vec![self.offset_ms, self.active as i64]
    }
}

/// Sample the number of active successful requests every `config.tick()`
///
/// Ticks run from the origin up to and including the latest successful end.
/// Requests shorter than one tick are reported on stderr since they may never
/// be sampled as active. Rows are computed lazily, one per tick.
pub fn active_counts(
    timeline: &Timeline,
    config: &ConverterConfig,
) -> Result<impl Iterator<Item = ActiveRow>> {
    let step = config.tick()?;

    let participants: Vec<NormalizedRecord> = timeline
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| config.is_success(record.status))
        .map(|(index, record)| {
            warn_if_shorter_than_step(index, record, step);
            *record
        })
        .collect();

    let max_end = participants
        .iter()
        .map(|record| record.end)
        .max()
        .ok_or_else(|| {
            ReqplotError::Configuration(format!(
                "no successful ({}) requests to sample",
                config.success_status
            ))
        })?;

    tracing::debug!(
        participants = participants.len(),
        max_end_ms = max_end.num_milliseconds(),
        step_ms = step.num_milliseconds(),
        "sampling active requests"
    );

    let ticks = std::iter::successors(Some(TimeDelta::zero()), move |tick| {
        tick.checked_add(&step)
    })
    .take_while(move |tick| *tick <= max_end);

    Ok(ticks.map(move |tick| {
        let active = participants
            .iter()
            .filter(|record| record.start < tick && record.end > tick)
            .count() as u64;

        ActiveRow {
            offset_ms: tick.num_milliseconds(),
            active,
        }
    }))
}

fn warn_if_shorter_than_step(index: usize, record: &NormalizedRecord, step: TimeDelta) {
    let duration = record.duration();

    if duration < TimeDelta::zero() {
        tracing::warn!(
            "request #{} ends before it starts (start {}ms, end {}ms)",
            index,
            record.start_ms(),
            record.end_ms()
        );
    }

    if duration < step {
        tracing::warn!(
            "found request with latency less than step: request #{} took {}ms, step is {}ms",
            index,
            duration.num_milliseconds(),
            step.num_milliseconds()
        );
    }
}
