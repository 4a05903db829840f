//! Interval packing for timeline charts
//!
//! Each request is drawn as a horizontal segment. Requests are assigned to
//! lanes greedily in start order: a request reuses the first lane whose
//! previous occupant ended strictly before it started, otherwise it opens a
//! new lane. Two requests that are active at the same time never share a
//! lane.

use chrono::TimeDelta;

use crate::config::{ConverterConfig, Variant};
use crate::dat_output::DatRow;
use crate::timeline::{NormalizedRecord, Timeline};

/// Lane index given to requests outside the lane status range
pub const FAILURE_LANE: usize = 0;

/// A request placed on a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneRow {
    /// 1-based lane, or [`FAILURE_LANE`] in the status-aware variant
    pub lane: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub status: Option<u16>,
}

impl DatRow for LaneRow {
    const HEADER: &'static str = "# non-overlapping index, start offset (ms), end offset (ms)";

    fn fields(&self) -> Vec<i64> {
        vec![self.lane as i64, self.start_ms, self.end_ms]
    }
}

/// [`LaneRow`] rendered with its status code as a fourth column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLaneRow(pub LaneRow);

impl DatRow for StatusLaneRow {
    const HEADER: &'static str =
        "# non-overlapping index, start offset (ms), end offset (ms), status";

    fn fields(&self) -> Vec<i64> {
        let mut fields = self.0.fields();
        fields.push(self.0.status.map_or(0, i64::from));
        fields
    }
}

/// Occupied lanes and the request currently holding each of them
///
/// Lanes are never released, only overwritten by a later request.
#[derive(Debug, Default)]
pub struct LaneTable {
    occupants: Vec<NormalizedRecord>,
}

impl LaneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a request and return its 1-based lane
    ///
    /// Requests must be claimed in ascending start order.
    pub fn claim(&mut self, record: NormalizedRecord) -> usize {
        match self
            .occupants
            .iter()
            .position(|occupant| occupant.end < record.start)
        {
            Some(position) => {
                self.occupants[position] = record;
                position + 1
            }
            None => {
                self.occupants.push(record);
                self.occupants.len()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }
}

/// Extend `end` so the rendered duration is at least `min_rendered`
fn clamp_rendered(record: NormalizedRecord, min_rendered: TimeDelta) -> NormalizedRecord {
    let rendered_ms = record.end_ms() - record.start_ms();
    if rendered_ms < min_rendered.num_milliseconds() {
        NormalizedRecord {
            end: record.start + min_rendered,
            ..record
        }
    } else {
        record
    }
}

/// Assign lanes to the participating requests of the timeline
///
/// `Variant::Intervals` packs only successful requests.
/// `Variant::IntervalsStatus` takes every request and puts those outside the
/// lane status range on [`FAILURE_LANE`] without consuming a lane.
pub fn assign_lanes(timeline: &Timeline, config: &ConverterConfig) -> Vec<LaneRow> {
    let status_aware = config.variant == Variant::IntervalsStatus;

    let mut participants: Vec<NormalizedRecord> = timeline
        .records()
        .iter()
        .filter(|record| status_aware || config.is_success(record.status))
        .map(|record| clamp_rendered(*record, config.min_rendered()))
        .collect();

    // Stable: equal starts keep document order
    participants.sort_by_key(|record| record.start);

    let mut table = LaneTable::new();
    let rows: Vec<LaneRow> = participants
        .into_iter()
        .map(|record| {
            let lane = if status_aware && !config.claims_lane(record.status) {
                FAILURE_LANE
            } else {
                table.claim(record)
            };

            LaneRow {
                lane,
                start_ms: record.start_ms(),
                end_ms: record.end_ms(),
                status: record.status,
            }
        })
        .collect();

    tracing::debug!(requests = rows.len(), lanes = table.len(), "assigned lanes");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::RequestRecord;

    fn timeline(records: &[(&str, &str, u16)]) -> Timeline {
        let records: Vec<RequestRecord> = records
            .iter()
            .map(|(start, end, status)| RequestRecord {
                start: format!("2024-01-01T00:00:{}Z", start),
                end: format!("2024-01-01T00:00:{}Z", end),
                status: Some(*status),
            })
            .collect();
        Timeline::normalize(&records).unwrap()
    }

    fn triples(rows: &[LaneRow]) -> Vec<(usize, i64, i64)> {
        rows.iter().map(|r| (r.lane, r.start_ms, r.end_ms)).collect()
    }

    #[test]
    fn test_disjoint_requests_share_lane() {
        let timeline = timeline(&[("00.000", "00.100", 204), ("00.200", "00.300", 204)]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 0, 100), (1, 200, 300)]);
    }

    #[test]
    fn test_overlapping_requests_get_distinct_lanes() {
        let timeline = timeline(&[("00.000", "00.200", 204), ("00.100", "00.300", 204)]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 0, 200), (2, 100, 300)]);
    }

    #[test]
    fn test_touching_requests_do_not_reuse_lane() {
        // end == start is not strictly before
        let timeline = timeline(&[("00.000", "00.100", 204), ("00.100", "00.200", 204)]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 0, 100), (2, 100, 200)]);
    }

    #[test]
    fn test_first_free_lane_is_reused() {
        let timeline = timeline(&[
            ("00.000", "00.500", 204),
            ("00.100", "00.200", 204),
            ("00.150", "00.400", 204),
            ("00.300", "00.350", 204),
            ("00.600", "00.700", 204),
        ]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(
            triples(&rows),
            vec![
                (1, 0, 500),
                (2, 100, 200),
                (3, 150, 400),
                (2, 300, 350),
                (1, 600, 700),
            ]
        );
    }

    #[test]
    fn test_rows_sorted_by_start() {
        let timeline = timeline(&[("00.300", "00.400", 204), ("00.000", "00.100", 204)]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 0, 100), (1, 300, 400)]);
    }

    #[test]
    fn test_sub_millisecond_request_clamped() {
        let timeline = timeline(&[
            ("00.000", "00.000400", 204),
            ("00.010", "00.010", 204),
        ]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 0, 1), (1, 10, 11)]);
    }

    #[test]
    fn test_inverted_request_clamped() {
        let timeline = timeline(&[("00.000", "00.500", 204), ("00.300", "00.100", 204)]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 0, 500), (2, 300, 301)]);
    }

    #[test]
    fn test_plain_variant_skips_failures() {
        let timeline = timeline(&[("00.000", "00.100", 500), ("00.200", "00.300", 204)]);
        let config = ConverterConfig::for_variant(Variant::Intervals);

        let rows = assign_lanes(&timeline, &config);
        assert_eq!(triples(&rows), vec![(1, 200, 300)]);
    }

    #[test]
    fn test_status_aware_failures_on_lane_zero() {
        let timeline = timeline(&[
            ("00.000", "00.300", 204),
            ("00.050", "00.100", 429),
            ("00.080", "00.200", 200),
            ("00.250", "00.400", 503),
        ]);
        let config = ConverterConfig::for_variant(Variant::IntervalsStatus);

        let rows = assign_lanes(&timeline, &config);
        let quads: Vec<_> = rows
            .iter()
            .map(|r| (r.lane, r.start_ms, r.end_ms, r.status))
            .collect();
        assert_eq!(
            quads,
            vec![
                (1, 0, 300, Some(204)),
                (0, 50, 100, Some(429)),
                (2, 80, 200, Some(200)),
                (0, 250, 400, Some(503)),
            ]
        );
    }

    #[test]
    fn test_status_row_has_four_columns() {
        let row = StatusLaneRow(LaneRow {
            lane: 0,
            start_ms: 5,
            end_ms: 9,
            status: Some(429),
        });
        assert_eq!(row.fields(), vec![0, 5, 9, 429]);
    }

    #[test]
    fn test_lane_table_grows_and_reuses() {
        let record = |start: i64, end: i64| NormalizedRecord {
            start: TimeDelta::milliseconds(start),
            end: TimeDelta::milliseconds(end),
            status: Some(204),
        };

        let mut table = LaneTable::new();
        assert!(table.is_empty());
        assert_eq!(table.claim(record(0, 10)), 1);
        assert_eq!(table.claim(record(5, 20)), 2);
        assert_eq!(table.claim(record(15, 30)), 1);
        assert_eq!(table.claim(record(25, 40)), 2);
        assert_eq!(table.len(), 2);
    }
}
