//! Summary document loader
//!
//! Reads the JSON activity summary written by the HTTP test server when it
//! shuts down:
//!
//! ```json
//! {"request_count": 2, "requests": [
//!     {"start": "2024-01-01T00:00:00.000Z", "end": "2024-01-01T00:00:00.050Z", "status": 204}
//! ]}
//! ```
//!
//! Records are returned exactly as listed: no reordering, no deduplication.

use std::io::Read;

use serde::Deserialize;

use crate::error::{ReqplotError, Result};

/// A single request as listed in the summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub start: String,
    pub end: String,
    /// Absent only when the variant does not need it
    pub status: Option<u16>,
}

/// Run totals recorded alongside the requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunTotals {
    pub request_count: Option<u64>,
    pub message_count: Option<u64>,
    pub byte_total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawRequest {
    start: Option<String>,
    end: Option<String>,
    status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    // Present but `null` when the server recorded nothing
    requests: Option<Vec<RawRequest>>,
    #[serde(flatten)]
    totals: RunTotals,
}

/// Parsed summary document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub requests: Vec<RequestRecord>,
    pub totals: RunTotals,
}

impl Summary {
    /// Parse a summary from JSON text
    pub fn from_json(text: &str, require_status: bool) -> Result<Self> {
        Self::from_slice(text.as_bytes(), require_status)
    }

    /// Parse a summary from raw bytes
    ///
    /// Invalid UTF-8 is a document error, not an I/O failure.
    pub fn from_slice(bytes: &[u8], require_status: bool) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::from_value(value, require_status)
    }

    /// Parse a summary from a reader (typically stdin)
    pub fn from_reader<R: Read>(mut reader: R, require_status: bool) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_slice(&bytes, require_status)
    }

    fn from_value(value: serde_json::Value, require_status: bool) -> Result<Self> {
        match value.get("requests") {
            Some(serde_json::Value::Array(_)) | Some(serde_json::Value::Null) => {}
            Some(_) => {
                return Err(ReqplotError::Parse(
                    "`requests` must be an array".to_string(),
                ))
            }
            None => {
                return Err(ReqplotError::Parse(
                    "missing `requests` array".to_string(),
                ))
            }
        }

        let raw: RawSummary = serde_json::from_value(value)?;
        let raw_requests = raw.requests.unwrap_or_default();

        let requests = raw_requests
            .into_iter()
            .enumerate()
            .map(|(index, raw)| to_record(index, raw, require_status))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            requests = requests.len(),
            totals = ?raw.totals,
            "loaded summary"
        );

        if let Some(expected) = raw.totals.request_count {
            if expected != requests.len() as u64 {
                tracing::warn!(
                    "summary request_count is {} but {} requests are listed",
                    expected,
                    requests.len()
                );
            }
        }

        Ok(Self {
            requests,
            totals: raw.totals,
        })
    }
}

fn to_record(index: usize, raw: RawRequest, require_status: bool) -> Result<RequestRecord> {
    let start = raw.start.ok_or(ReqplotError::Field {
        index,
        field: "start",
    })?;
    let end = raw.end.ok_or(ReqplotError::Field {
        index,
        field: "end",
    })?;
    if require_status && raw.status.is_none() {
        return Err(ReqplotError::Field {
            index,
            field: "status",
        });
    }

    Ok(RequestRecord {
        start,
        end,
        status: raw.status,
    })
}
