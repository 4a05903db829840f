//! Issued and succeeded requests per one-second bucket

use crate::config::ConverterConfig;
use crate::dat_output::DatRow;
use crate::timeline::Timeline;

/// Counts for one second of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRow {
    /// Bucket index
    pub second: i64,
    /// Requests that started in this second
    pub issued: u64,
    /// Successful requests that ended in this second
    pub succeeded: u64,
}

impl DatRow for BucketRow {
    const HEADER: &'static str = "# offset (seconds), issued req/sec, success req/sec";

    fn fields(&self) -> Vec<i64> {
        vec![self.second * 1000, self.issued as i64, self.succeeded as i64]
    }
}

/// Count issued and succeeded requests per whole second of the run
///
/// The run lasts `max_end` truncated to whole seconds and every second is
/// emitted, including empty ones. Events falling at or beyond the last whole
/// second are not counted.
pub fn bucket_counts(timeline: &Timeline, config: &ConverterConfig) -> Vec<BucketRow> {
    let duration = timeline.max_end().num_seconds().max(0) as usize;

    let mut issued = vec![0u64; duration];
    let mut succeeded = vec![0u64; duration];

    for record in timeline.records() {
        if let Some(slot) = bucket(record.start.num_seconds(), duration) {
            issued[slot] += 1;
        }
        if config.is_success(record.status) {
            if let Some(slot) = bucket(record.end.num_seconds(), duration) {
                succeeded[slot] += 1;
            }
        }
    }

    let rows: Vec<BucketRow> = issued
        .into_iter()
        .zip(succeeded)
        .enumerate()
        .map(|(second, (issued, succeeded))| BucketRow {
            second: second as i64,
            issued,
            succeeded,
        })
        .collect();

    tracing::debug!(buckets = rows.len(), "counted throughput buckets");
    rows
}

fn bucket(seconds: i64, duration: usize) -> Option<usize> {
    usize::try_from(seconds).ok().filter(|&slot| slot < duration)
}
