//! Implied volatility surface table.
//!
//! A rectangular grid of volatilities where rows are observation dates and
//! columns are moneyness ratios. The only invariant is rectangularity: one
//! row label per row, and every row as long as the column labels.
//!
//! # Grid Layout
//!
//! The grid is organised as `values[date_idx][moneyness_idx]`.
//!
//! # CSV Layout
//!
//! ```text
//! date,0.80,0.90,1.00,1.10
//! 2024-01-02,0.31,0.27,0.24,0.23
//! 2024-01-03,0.32,0.28,0.25,0.24
//! ```

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;

use crate::types::{StatsError, StatsResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Volatility grid indexed by date (rows) and moneyness (columns).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use volviz_core::market_data::VolSurfaceTable;
///
/// let dates = vec![
///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
/// ];
/// let moneyness = vec![0.9, 1.0, 1.1];
/// let values = vec![vec![0.25, 0.22, 0.21], vec![0.26, 0.23, 0.22]];
///
/// let table = VolSurfaceTable::new(dates, moneyness, values).unwrap();
/// assert_eq!(table.shape(), (2, 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSurfaceTable"))]
pub struct VolSurfaceTable {
    row_labels: Vec<NaiveDate>,
    column_labels: Vec<f64>,
    values: Vec<Vec<f64>>,
}

/// Unchecked wire form; deserialised tables pass through [`VolSurfaceTable::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSurfaceTable {
    row_labels: Vec<NaiveDate>,
    column_labels: Vec<f64>,
    values: Vec<Vec<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSurfaceTable> for VolSurfaceTable {
    type Error = StatsError;

    fn try_from(raw: RawSurfaceTable) -> StatsResult<Self> {
        Self::new(raw.row_labels, raw.column_labels, raw.values)
    }
}

impl VolSurfaceTable {
    /// Construct a table, checking rectangularity.
    ///
    /// # Errors
    ///
    /// - `StatsError::ShapeMismatch` if the row count differs from the row
    ///   label count, or a row length differs from the column label count
    /// - `StatsError::InvalidParameter` if a column label is not finite
    pub fn new(
        row_labels: Vec<NaiveDate>,
        column_labels: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> StatsResult<Self> {
        if values.len() != row_labels.len() {
            return Err(StatsError::shape(
                "surface row labels",
                row_labels.len(),
                values.len(),
            ));
        }

        for (i, row) in values.iter().enumerate() {
            if row.len() != column_labels.len() {
                return Err(StatsError::shape(
                    format!("surface row {}", i),
                    column_labels.len(),
                    row.len(),
                ));
            }
        }

        if let Some(bad) = column_labels.iter().find(|m| !m.is_finite()) {
            return Err(StatsError::invalid(format!(
                "moneyness label {} is not finite",
                bad
            )));
        }

        Ok(Self {
            row_labels,
            column_labels,
            values,
        })
    }

    /// Load a table from CSV data.
    ///
    /// The header holds `date` followed by the moneyness labels; each record
    /// holds an ISO date followed by one volatility per column.
    pub fn from_csv_reader<R: Read>(reader: R) -> StatsResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column_labels = headers
            .iter()
            .skip(1)
            .map(|h| {
                h.parse::<f64>()
                    .map_err(|e| StatsError::Parse(format!("moneyness header '{}': {}", h, e)))
            })
            .collect::<StatsResult<Vec<f64>>>()?;

        let mut row_labels = Vec::new();
        let mut values = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let mut fields = record.iter();
            let date_field = fields
                .next()
                .ok_or_else(|| StatsError::Parse(format!("record {} is empty", line + 1)))?;
            let date = NaiveDate::parse_from_str(date_field, DATE_FORMAT).map_err(|e| {
                StatsError::Parse(format!("record {} date '{}': {}", line + 1, date_field, e))
            })?;
            let row = fields
                .map(|v| {
                    v.parse::<f64>().map_err(|e| {
                        StatsError::Parse(format!("record {} value '{}': {}", line + 1, v, e))
                    })
                })
                .collect::<StatsResult<Vec<f64>>>()?;
            row_labels.push(date);
            values.push(row);
        }

        Self::new(row_labels, column_labels, values)
    }

    /// Load a table from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> StatsResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| StatsError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_csv_reader(file)
    }

    /// Serialise the table back to the CSV layout read by [`Self::from_csv_reader`].
    pub fn to_csv_string(&self) -> StatsResult<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        let mut header = vec!["date".to_string()];
        header.extend(self.column_labels.iter().map(|m| m.to_string()));
        wtr.write_record(&header)?;
        for (date, row) in self.row_labels.iter().zip(self.values.iter()) {
            let mut record = vec![date.format(DATE_FORMAT).to_string()];
            record.extend(row.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| StatsError::Io(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| StatsError::Parse(e.to_string()))
    }

    /// `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    /// Observation dates.
    #[inline]
    pub fn row_labels(&self) -> &[NaiveDate] {
        &self.row_labels
    }

    /// Moneyness ratios.
    #[inline]
    pub fn column_labels(&self) -> &[f64] {
        &self.column_labels
    }

    /// Grid rows.
    #[inline]
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Volatility at `(row, column)`, if in range.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Row labels formatted as ISO dates.
    pub fn row_label_strings(&self) -> Vec<String> {
        self.row_labels
            .iter()
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect()
    }

    /// Named columns, one per moneyness ratio, each holding the values for
    /// every date in row order.
    pub fn to_column_major(&self) -> Vec<(String, Vec<f64>)> {
        self.column_labels
            .iter()
            .enumerate()
            .map(|(j, m)| {
                let column = self.values.iter().map(|row| row[j]).collect();
                (m.to_string(), column)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialise_rejects_ragged_grid() {
        let json = r#"{"row_labels":["2024-01-02","2024-01-03"],"column_labels":[0.9,1.0,1.1],"values":[[0.2,0.3,0.4],[0.2]]}"#;
        let err = serde_json::from_str::<VolSurfaceTable>(json).unwrap_err();
        assert!(err.to_string().contains("surface row 1"), "{}", err);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_keeps_grid() {
        let table = VolSurfaceTable::new(dates(2), vec![0.9, 1.0], vec![vec![0.3, 0.25], vec![0.31, 0.26]]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let back: VolSurfaceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.to_column_major()[1].1, vec![0.25, 0.26]);
    }

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect()
    }

    fn grid(rows: usize, cols: usize) -> Vec<Vec<f64>> {
        (0..rows)
            .map(|i| (0..cols).map(|j| 0.2 + 0.001 * (i + j) as f64).collect())
            .collect()
    }

    fn moneyness(cols: usize) -> Vec<f64> {
        (0..cols).map(|j| 0.6 + 0.025 * j as f64).collect()
    }

    #[test]
    fn test_fifteen_by_thirty_six() {
        let table = VolSurfaceTable::new(dates(15), moneyness(36), grid(15, 36)).unwrap();
        assert_eq!(table.shape(), (15, 36));
        assert_eq!(table.get(14, 35), Some(0.2 + 0.001 * 49.0));
        assert_eq!(table.get(15, 0), None);
    }

    #[test]
    fn test_row_label_mismatch() {
        let err = VolSurfaceTable::new(dates(14), moneyness(36), grid(15, 36)).unwrap_err();
        assert!(matches!(
            err,
            StatsError::ShapeMismatch { expected: 14, got: 15, .. }
        ));
    }

    #[test]
    fn test_ragged_row() {
        let mut values = grid(15, 36);
        values[7].pop();
        let err = VolSurfaceTable::new(dates(15), moneyness(36), values).unwrap_err();
        match err {
            StatsError::ShapeMismatch { context, expected, got } => {
                assert_eq!(context, "surface row 7");
                assert_eq!(expected, 36);
                assert_eq!(got, 35);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_moneyness() {
        let mut labels = moneyness(3);
        labels[1] = f64::NAN;
        assert!(matches!(
            VolSurfaceTable::new(dates(1), labels, grid(1, 3)),
            Err(StatsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_csv_round_trip() {
        let csv = "date,0.9,1.0,1.1\n2024-01-02,0.25,0.22,0.21\n2024-01-03,0.26,0.23,0.22\n";
        let table = VolSurfaceTable::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.row_label_strings(), vec!["2024-01-02", "2024-01-03"]);
        assert_eq!(table.column_labels(), &[0.9, 1.0, 1.1]);

        let written = table.to_csv_string().unwrap();
        let reread = VolSurfaceTable::from_csv_reader(written.as_bytes()).unwrap();
        assert_eq!(reread, table);
    }

    #[test]
    fn test_csv_short_row_is_shape_mismatch() {
        let csv = "date,0.9,1.0\n2024-01-02,0.25\n";
        assert!(matches!(
            VolSurfaceTable::from_csv_reader(csv.as_bytes()),
            Err(StatsError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_csv_bad_date() {
        let csv = "date,0.9\n02/01/2024,0.25\n";
        assert!(matches!(
            VolSurfaceTable::from_csv_reader(csv.as_bytes()),
            Err(StatsError::Parse(_))
        ));
    }

    #[test]
    fn test_column_major() {
        let table = VolSurfaceTable::new(dates(2), vec![0.9, 1.1], vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let columns = table.to_column_major();
        assert_eq!(columns[0], ("0.9".to_string(), vec![1.0, 3.0]));
        assert_eq!(columns[1], ("1.1".to_string(), vec![2.0, 4.0]));
    }
}
