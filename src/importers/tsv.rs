use super::MeasurementSource;
use crate::catalog::FileReference;
use crate::datamodel::{Measurement, MeasurementDateTime, MeasurementDateTimeExt, MeasurementTable};
use crate::error::DashboardError;
use async_trait::async_trait;
use csv_async::StringRecord;
use futures::StreamExt;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

// Column positions in the measurement files
const YEAR: usize = 0;
const MONTH: usize = 1;
const DAY: usize = 2;
const HOUR: usize = 3;
const MINUTE: usize = 4;
const CH4: usize = 5;
const CO2: usize = 7;
const MIN_COLUMNS: usize = 8;

/// Loads tab separated measurement files from disk, without any caching.
#[derive(Debug, Default, Clone, Copy)]
pub struct TsvMeasurementSource;

#[async_trait]
impl MeasurementSource for TsvMeasurementSource {
    async fn load(&self, file: &FileReference) -> Result<Arc<MeasurementTable>, DashboardError> {
        load_measurements(file).await.map(Arc::new)
    }
}

/// Read and parse a measurement file.
pub async fn load_measurements(file: &FileReference) -> Result<MeasurementTable, DashboardError> {
    let data = tokio::fs::read(&file.path)
        .await
        .map_err(|err| DashboardError::from_io(&file.name, err))?;
    let table = parse_measurements(&file.name, &data).await?;
    debug!("Loaded {} measurements from {}", table.len(), file.name);
    Ok(table)
}

/// Parse tab separated measurements without a header line.
///
/// Columns 0 to 4 hold year, month, day, hour and minute, column 5 the CH4
/// reading and column 7 the CO2 reading. Other columns are ignored.
pub async fn parse_measurements(
    reference: &str,
    data: &[u8],
) -> Result<MeasurementTable, DashboardError> {
    let mut csv_reader = csv_async::AsyncReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .create_reader(data);

    let mut rows = Vec::new();
    let mut records = csv_reader.records();
    while let Some(record) = records.next().await {
        let record = record.map_err(|err| {
            DashboardError::parse(reference, rows.len() as u64 + 1, err)
        })?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(rows.len() as u64 + 1);
        rows.push(parse_record(reference, line, &record)?);
    }

    Ok(MeasurementTable::new(rows))
}

fn parse_record(
    reference: &str,
    line: u64,
    record: &StringRecord,
) -> Result<Measurement, DashboardError> {
    if record.len() < MIN_COLUMNS {
        return Err(DashboardError::parse(
            reference,
            line,
            format!(
                "expected at least {} columns, found {}",
                MIN_COLUMNS,
                record.len()
            ),
        ));
    }
    let field = |index: usize| record.get(index).unwrap_or_default().trim();

    let year: i32 = parse_integer(reference, line, "year", field(YEAR))?;
    let month: u8 = parse_integer(reference, line, "month", field(MONTH))?;
    let day: u8 = parse_integer(reference, line, "day", field(DAY))?;
    let hour: u8 = parse_integer(reference, line, "hour", field(HOUR))?;
    let minute: u8 = parse_integer(reference, line, "minute", field(MINUTE))?;

    let datetime = MeasurementDateTime::from_calendar_minute(year, month, day, hour, minute)
        .map_err(|err| DashboardError::parse(reference, line, err))?;

    Ok(Measurement {
        datetime,
        ch4: parse_reading(reference, line, "CH4", field(CH4))?,
        co2: parse_reading(reference, line, "CO2", field(CO2))?,
    })
}

fn parse_integer<T>(reference: &str, line: u64, name: &str, raw: &str) -> Result<T, DashboardError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|err| {
        DashboardError::parse(reference, line, format!("invalid {} '{}': {}", name, raw, err))
    })
}

// Empty cells are missing readings
fn parse_reading(reference: &str, line: u64, name: &str, raw: &str) -> Result<f64, DashboardError> {
    if raw.is_empty() {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>().map_err(|err| {
        DashboardError::parse(reference, line, format!("invalid {} value '{}': {}", name, raw, err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const TWO_ROWS: &str = "2023\t01\t01\t00\t00\t5.0\t-\t410.0\n\
                            2023\t01\t01\t00\t05\t5.2\t-\t411.0\n";

    fn minute(minute: u8) -> MeasurementDateTime {
        MeasurementDateTime::from_calendar_minute(2023, 1, 1, 0, minute).unwrap()
    }

    #[tokio::test]
    async fn test_parse_two_rows() {
        let table = parse_measurements("a.csv", TWO_ROWS.as_bytes()).await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].datetime, minute(0));
        assert_eq!(table.rows()[1].datetime, minute(5));
        let ch4: Vec<f64> = table.rows().iter().map(|row| row.ch4).collect();
        let co2: Vec<f64> = table.rows().iter().map(|row| row.co2).collect();
        assert_eq!(ch4, vec![5.0, 5.2]);
        assert_eq!(co2, vec![410.0, 411.0]);
    }

    #[tokio::test]
    async fn test_parse_keeps_file_order_and_ignores_extra_columns() {
        let data = "2023\t1\t1\t0\t10\t1.9\tx\t420.5\textra\t42\n\
                    2023\t1\t1\t0\t05\t1.8\tx\t419.5\n";
        let table = parse_measurements("a.csv", data.as_bytes()).await.unwrap();
        assert_eq!(table.rows()[0].datetime, minute(10));
        assert_eq!(table.rows()[1].datetime, minute(5));
        assert_eq!(table.rows()[0].co2, 420.5);
    }

    #[tokio::test]
    async fn test_parse_empty_reading_is_nan() {
        let data = "2023\t1\t1\t0\t0\t\t-\t410.0\n";
        let table = parse_measurements("a.csv", data.as_bytes()).await.unwrap();
        assert!(table.rows()[0].ch4.is_nan());
        assert_eq!(table.rows()[0].co2, 410.0);
    }

    #[tokio::test]
    async fn test_parse_empty_file() {
        let table = parse_measurements("a.csv", b"").await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_parse_too_few_columns() {
        let data = "2023\t1\t1\t0\t0\t5.0\n";
        let err = parse_measurements("a.csv", data.as_bytes()).await.unwrap_err();
        match err {
            DashboardError::Parse { line, message, .. } => {
                assert_eq!(line, 1);
                assert!(message.contains("at least 8 columns"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_parse_invalid_values() {
        let data = format!("{}2023\tJan\t1\t0\t0\t5.0\t-\t410.0\n", TWO_ROWS);
        let err = parse_measurements("a.csv", data.as_bytes()).await.unwrap_err();
        match err {
            DashboardError::Parse { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("month"));
            }
            other => panic!("Unexpected error: {:?}", other),
        }

        let data = "2023\t1\t1\t0\t0\t5.0\t-\tabc\n";
        let err = parse_measurements("a.csv", data.as_bytes()).await.unwrap_err();
        assert!(err.to_string().contains("CO2"));

        // Impossible calendar date
        let data = "2023\t2\t30\t0\t0\t5.0\t-\t410.0\n";
        let err = parse_measurements("a.csv", data.as_bytes()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_parse_out_of_range_time_of_day() {
        let data = format!("{}2023\t1\t1\t24\t0\t5.0\t-\t410.0\n", TWO_ROWS);
        let err = parse_measurements("a.csv", data.as_bytes()).await.unwrap_err();
        match err {
            DashboardError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("Unexpected error: {:?}", other),
        }

        let data = "2023\t1\t1\t0\t60\t5.0\t-\t410.0\n";
        let err = parse_measurements("a.csv", data.as_bytes()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Parse { line: 1, .. }));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let file = FileReference::new(PathBuf::from("/nonexistent/trace/gas.csv"));
        let err = load_measurements(&file).await.unwrap_err();
        assert!(matches!(err, DashboardError::NotFound { ref reference } if reference == "gas.csv"));
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, TWO_ROWS).unwrap();
        let file = FileReference::new(path);

        let source = TsvMeasurementSource;
        let first = source.load(&file).await.unwrap();
        let second = source.load(&file).await.unwrap();
        assert_eq!(first, second);
    }
}
