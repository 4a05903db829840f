//! Time normalization
//!
//! Converts the ISO-8601 timestamps of a summary into offsets from the
//! earliest request start. Offsets keep the full precision of the parsed
//! instants; they are truncated to whole milliseconds only when emitted.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

use crate::error::{ReqplotError, Result};
use crate::summary::RequestRecord;

/// Offset-less layouts accepted in addition to RFC 3339; read as UTC
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Request with start/end expressed relative to the timeline origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub start: TimeDelta,
    pub end: TimeDelta,
    pub status: Option<u16>,
}

impl NormalizedRecord {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Start offset truncated to whole milliseconds
    pub fn start_ms(&self) -> i64 {
        self.start.num_milliseconds()
    }

    /// End offset truncated to whole milliseconds
    pub fn end_ms(&self) -> i64 {
        self.end.num_milliseconds()
    }
}

/// Normalized records plus the bounds derived from them
///
/// Built once per run and passed by reference to the aggregators.
#[derive(Debug, Clone)]
pub struct Timeline {
    origin: DateTime<Utc>,
    max_end: TimeDelta,
    records: Vec<NormalizedRecord>,
}

impl Timeline {
    /// Normalize records against the earliest start time
    pub fn normalize(records: &[RequestRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(ReqplotError::Configuration(
                "no requests to normalize".to_string(),
            ));
        }

        let instants = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let start = parse_timestamp(&record.start, index, "start")?;
                let end = parse_timestamp(&record.end, index, "end")?;
                Ok((start, end, record.status))
            })
            .collect::<Result<Vec<_>>>()?;

        // Non-empty, checked above
        let origin = instants
            .iter()
            .map(|(start, _, _)| *start)
            .min()
            .ok_or_else(|| ReqplotError::Configuration("no requests to normalize".into()))?;

        let records: Vec<NormalizedRecord> = instants
            .into_iter()
            .map(|(start, end, status)| NormalizedRecord {
                start: start - origin,
                end: end - origin,
                status,
            })
            .collect();

        let max_end = records
            .iter()
            .map(|r| r.end)
            .max()
            .unwrap_or_else(TimeDelta::zero);

        tracing::debug!(
            %origin,
            records = records.len(),
            max_end_ms = max_end.num_milliseconds(),
            "normalized timeline"
        );

        Ok(Self {
            origin,
            max_end,
            records,
        })
    }

    pub fn origin(&self) -> DateTime<Utc> {
        self.origin
    }

    /// Latest end offset over all records
    pub fn max_end(&self) -> TimeDelta {
        self.max_end
    }

    /// Records in document order
    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }
}

/// Parse an ISO-8601 timestamp into a UTC instant
///
/// Accepts RFC 3339 (`Z` or numeric offset, any fractional precision) and
/// offset-less date-times, which are taken to be UTC.
pub fn parse_timestamp(value: &str, index: usize, field: &'static str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ReqplotError::TimeParse {
            index,
            field,
            value: value.to_string(),
        })
}
