//! Summary-to-DAT pipeline
//!
//! Loader -> normalizer -> aggregator -> emitter, run once per invocation.

use std::io::{self, Read, Write};

use crate::active::active_counts;
use crate::config::{ConverterConfig, Variant};
use crate::dat_output::DatOutput;
use crate::error::{ReqplotError, Result};
use crate::lanes::{assign_lanes, StatusLaneRow};
use crate::rate::sliding_rate;
use crate::summary::Summary;
use crate::throughput::bucket_counts;
use crate::timeline::Timeline;

/// Convert the summary read from `input` into DAT rows written to `output`
///
/// Returns the number of data rows written (the header is not counted).
pub fn convert<R: Read, W: Write>(config: &ConverterConfig, input: R, output: W) -> Result<usize> {
    config.validate()?;

    let summary = Summary::from_reader(input, config.variant.requires_status())?;
    let timeline = Timeline::normalize(&summary.requests)?;

    let mut dat = DatOutput::new(output);
    match config.variant {
        Variant::Active | Variant::ActiveCoarse => {
            dat.write_all(active_counts(&timeline, config)?)?;
        }
        Variant::Intervals => {
            dat.write_all(assign_lanes(&timeline, config))?;
        }
        Variant::IntervalsStatus => {
            dat.write_all(assign_lanes(&timeline, config).into_iter().map(StatusLaneRow))?;
        }
        Variant::Throughput => {
            dat.write_all(bucket_counts(&timeline, config))?;
        }
        Variant::Rate => {
            dat.write_all(sliding_rate(&timeline, config)?)?;
        }
    }

    let rows = dat.rows_written();
    dat.finish()?;
    Ok(rows)
}

/// Convert a summary held in memory, returning the DAT text
pub fn convert_str(variant: Variant, json: &str) -> Result<String> {
    let config = ConverterConfig::for_variant(variant);
    let mut output = Vec::new();
    convert(&config, json.as_bytes(), &mut output)?;
    String::from_utf8(output)
        .map_err(|err| ReqplotError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}
