use super::measurement_datetime::MeasurementDateTime;
use super::pollutant::Pollutant;

/// One row of a measurement file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub datetime: MeasurementDateTime,
    pub ch4: f64,
    pub co2: f64,
}

impl Measurement {
    pub fn value_of(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Ch4 => self.ch4,
            Pollutant::Co2 => self.co2,
        }
    }
}

/// Measurements of a single file, in file order.
///
/// Timestamps may repeat and are not guaranteed to be sorted, use
/// [`MeasurementTable::sorted`] before any range query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    rows: Vec<Measurement>,
}

impl MeasurementTable {
    pub fn new(rows: Vec<Measurement>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ordered by timestamp. Rows sharing a timestamp keep their file order.
    pub fn sorted(&self) -> Vec<&Measurement> {
        let mut rows: Vec<&Measurement> = self.rows.iter().collect();
        rows.sort_by(|a, b| a.datetime.cmp(&b.datetime));
        rows
    }
}

impl FromIterator<Measurement> for MeasurementTable {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::MeasurementDateTimeExt;

    fn measurement(minute: u8, ch4: f64, co2: f64) -> Measurement {
        Measurement {
            datetime: MeasurementDateTime::from_calendar_minute(2023, 1, 1, 0, minute).unwrap(),
            ch4,
            co2,
        }
    }

    #[test]
    fn test_value_of() {
        let row = measurement(0, 5.0, 410.0);
        assert_eq!(row.value_of(Pollutant::Ch4), 5.0);
        assert_eq!(row.value_of(Pollutant::Co2), 410.0);
    }

    #[test]
    fn test_sorted_is_stable_and_keeps_table_untouched() {
        let table: MeasurementTable = vec![
            measurement(10, 1.0, 1.0),
            measurement(5, 2.0, 2.0),
            measurement(10, 3.0, 3.0),
            measurement(0, 4.0, 4.0),
        ]
        .into_iter()
        .collect();

        let sorted = table.sorted();
        let ch4: Vec<f64> = sorted.iter().map(|row| row.ch4).collect();
        assert_eq!(ch4, vec![4.0, 2.0, 1.0, 3.0]);

        // File order is preserved in the table itself
        assert_eq!(table.rows()[0].ch4, 1.0);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_empty_table() {
        let table = MeasurementTable::default();
        assert!(table.is_empty());
        assert!(table.sorted().is_empty());
    }
}
