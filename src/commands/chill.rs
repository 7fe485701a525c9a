use crate::OutputFormat;
use crate::chill::{Algorithm, OBS_TYPES};
use crate::record::{MemorySource, Record, RecordSource, TimeSpan};
use crate::units::{UnitSystem, ValueTuple};
use crate::xtypes::XTypeRegistry;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ChillReport {
    algorithm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<usize>,
    chill: ValueTuple,
}

fn print_report(report: &ChillReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{:.2} hours ({})", report.chill.value, report.algorithm);
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).context("Failed to serialize result")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Chill time contributed by a single observation
pub fn scalar(
    registry: &XTypeRegistry,
    algorithm: Algorithm,
    temp: f64,
    interval_minutes: f64,
    units: UnitSystem,
    format: OutputFormat,
) -> Result<()> {
    let record = Record::new(Utc::now(), units, Some(temp), Some(interval_minutes));
    let vt = registry
        .get_scalar(OBS_TYPES[0], &record)
        .context("Failed to compute chill time")?;

    print_report(
        &ChillReport {
            algorithm: algorithm.to_string(),
            records: None,
            chill: vt,
        },
        format,
    )
}

/// Sum of chill time over the records of a JSON file within `(start, end]`
pub fn sum(
    registry: &XTypeRegistry,
    algorithm: Algorithm,
    records_path: &Path,
    start: &str,
    end: &str,
    format: OutputFormat,
) -> Result<()> {
    let span = TimeSpan::new(parse_time(start)?, parse_time(end)?);
    if span.start >= span.stop {
        anyhow::bail!("Start time must be before end time");
    }

    let source = MemorySource::from_json_file(records_path)?;
    let in_span = source
        .records(&span)
        .map(|records| records.count())
        .unwrap_or(0);

    let vt = registry
        .get_aggregate(OBS_TYPES[0], &span, "sum", &source)
        .context("Failed to sum chill time")?;

    print_report(
        &ChillReport {
            algorithm: algorithm.to_string(),
            records: Some(in_span),
            chill: vt,
        },
        format,
    )
}

fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid time '{}', expected RFC 3339", s))?;
    Ok(ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_with_offset() {
        let ts = parse_time("2026-01-07T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-01-07T08:00:00+00:00");
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("yesterday").is_err());
    }
}
