//! Tabular data.

use crate::model::Value;
use crate::series::Series;
use anyhow::{Result, bail};
use std::{
    collections::HashMap,
    ops::{Bound, RangeBounds},
};

/// Table of values.
///
/// Columns are addressed by name and rows by index. Every row has exactly one
/// cell per header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataFrame {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataFrame {
    /// Create an empty data frame with the given headers.
    ///
    /// # Errors
    /// Returns an error if headers repeat or are empty.
    pub fn new(headers: Vec<String>) -> Result<Self> {
        check_headers(&headers)?;
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Create a data frame from named columns.
    ///
    /// # Errors
    /// Returns an error if column names repeat or column lengths differ.
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, |(_, vals)| vals.len());
        for (name, vals) in &columns {
            if vals.len() != n_rows {
                bail!(
                    "column {name:?} must have {n_rows} values, but has {}",
                    vals.len()
                );
            }
        }
        let headers: Vec<_> = columns.iter().map(|(name, _)| name.clone()).collect();
        check_headers(&headers)?;

        let mut rows: Vec<Vec<Value>> = (0..n_rows)
            .map(|_| Vec::with_capacity(headers.len()))
            .collect();
        for (_, vals) in columns {
            for (row, val) in rows.iter_mut().zip(vals) {
                row.push(val);
            }
        }

        Ok(Self { headers, rows })
    }

    /// Create a data frame from rows laid out in header order.
    ///
    /// # Errors
    /// Returns an error if headers repeat or a row has the wrong width.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        check_headers(&headers)?;
        for (i_row, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                bail!(
                    "row {i_row} must have {} values, but has {}",
                    headers.len(),
                    row.len()
                );
            }
        }
        Ok(Self { headers, rows })
    }

    /// Create a data frame from records keyed by column name.
    ///
    /// Keys missing from a record become [`Value::Null`]; keys that are not
    /// headers are ignored.
    ///
    /// # Errors
    /// Returns an error if headers repeat.
    pub fn from_records(headers: Vec<String>, records: Vec<HashMap<String, Value>>) -> Result<Self> {
        check_headers(&headers)?;
        let rows = records
            .into_iter()
            .map(|mut record| {
                headers
                    .iter()
                    .map(|key| record.remove(key).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Get the column named `name`, if any.
    pub fn column(&self, name: &str) -> Option<Series> {
        let i_col = self.col_idx(name)?;
        Some(self.rows.iter().map(|row| row[i_col].clone()).collect())
    }

    /// Keep only the named columns, in the given order.
    ///
    /// Unknown names are ignored.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> DataFrame {
        let i_cols: Vec<_> = names
            .iter()
            .filter_map(|name| self.col_idx(name.as_ref()))
            .collect();
        let headers = i_cols.iter().map(|&i_col| self.headers[i_col].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| i_cols.iter().map(|&i_col| row[i_col].clone()).collect())
            .collect();
        DataFrame { headers, rows }
    }

    /// Get the row at `idx` as a one-row data frame.
    ///
    /// Negative indexes count from the end.
    pub fn row(&self, idx: isize) -> Option<DataFrame> {
        let n_rows = self.rows.len() as isize;
        let idx = if idx < 0 { n_rows + idx } else { idx };
        if !(0..n_rows).contains(&idx) {
            return None;
        }
        Some(self.with_rows(vec![self.rows[idx as usize].clone()]))
    }

    /// Get the rows in `range`, clamped to the number of rows.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> DataFrame {
        let n_rows = self.rows.len();
        let start = match range.start_bound() {
            Bound::Included(&idx) => idx,
            Bound::Excluded(&idx) => idx.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&idx) => idx.saturating_add(1),
            Bound::Excluded(&idx) => idx,
            Bound::Unbounded => n_rows,
        };
        let end = end.min(n_rows);
        let start = start.min(end);
        self.with_rows(self.rows[start..end].to_vec())
    }

    /// Get the rows at `idxs`, in the given order.
    ///
    /// Out of range indexes are ignored.
    pub fn take(&self, idxs: &[usize]) -> DataFrame {
        let rows = idxs
            .iter()
            .filter_map(|&idx| self.rows.get(idx).cloned())
            .collect();
        self.with_rows(rows)
    }

    fn col_idx(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    fn with_rows(&self, rows: Vec<Vec<Value>>) -> DataFrame {
        DataFrame {
            headers: self.headers.clone(),
            rows,
        }
    }
}

fn check_headers(headers: &[String]) -> Result<()> {
    for (i_col, header) in headers.iter().enumerate() {
        if header.is_empty() {
            bail!("header {i_col} must not be empty");
        }
        if headers[..i_col].contains(header) {
            bail!("header {header:?} is repeated");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn people() -> DataFrame {
        DataFrame::from_columns(vec![
            (
                "first_name".to_string(),
                vec!["Marco".into(), "Giovanni".into(), "Alice".into(), "Marco".into()],
            ),
            (
                "last_name".to_string(),
                vec!["Some".into(), "Thing".into(), "Else".into(), "Qwerty".into()],
            ),
            (
                "age".to_string(),
                vec![20.into(), 22.into(), 24.into(), 32.into()],
            ),
        ])
        .unwrap()
    }

    fn row(first_name: &str, last_name: &str, age: i64) -> Vec<Value> {
        vec![first_name.into(), last_name.into(), age.into()]
    }

    #[test]
    fn empty_frame() {
        let frame = DataFrame::new(headers(&["first_name", "last_name", "age"])).unwrap();
        assert!(frame.rows().is_empty());
        assert_eq!(frame.headers().len(), 3);
    }

    #[test]
    fn empty_frame_rejects_bad_headers() {
        assert!(DataFrame::new(headers(&["age", "age"])).is_err());
        assert!(DataFrame::new(headers(&["age", ""])).is_err());
    }

    #[test]
    fn columns_are_transposed() {
        let frame = DataFrame::from_columns(vec![
            ("first_name".to_string(), vec!["Marco".into(), "Giovanni".into()]),
            ("age".to_string(), vec![20.into(), 22.into()]),
        ])
        .unwrap();
        assert_eq!(frame.headers(), headers(&["first_name", "age"]));
        assert_eq!(
            frame.rows(),
            vec![
                vec![Value::from("Marco"), Value::from(20)],
                vec![Value::from("Giovanni"), Value::from(22)],
            ]
        );
    }

    #[test]
    fn uneven_columns_are_rejected() {
        let res = DataFrame::from_columns(vec![
            ("a".to_string(), vec![1.into(), 2.into()]),
            ("b".to_string(), vec![1.into()]),
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn repeated_headers_are_rejected() {
        assert!(DataFrame::from_rows(headers(&["a", "a"]), Vec::new()).is_err());
    }

    #[test]
    fn rows_are_stored() {
        let rows = vec![row("Marco", "Some", 20), row("Giovanni", "Thing", 22)];
        let frame =
            DataFrame::from_rows(headers(&["first_name", "last_name", "age"]), rows.clone())
                .unwrap();
        assert_eq!(frame.rows(), rows);
    }

    #[test]
    fn narrow_rows_are_rejected() {
        let res = DataFrame::from_rows(headers(&["a", "b"]), vec![vec![1.into()]]);
        assert!(res.is_err());
    }

    #[test]
    fn records_follow_header_order() {
        let records = vec![
            HashMap::from([
                ("age".to_string(), Value::from(20)),
                ("first_name".to_string(), Value::from("Marco")),
                ("nickname".to_string(), Value::from("Mark")),
            ]),
            HashMap::from([("first_name".to_string(), Value::from("Giovanni"))]),
        ];
        let frame = DataFrame::from_records(headers(&["first_name", "age"]), records).unwrap();
        assert_eq!(
            frame.rows(),
            vec![
                vec![Value::from("Marco"), Value::from(20)],
                vec![Value::from("Giovanni"), Value::Null],
            ]
        );
        assert!(!frame.rows()[0][1].is_null());
        assert!(frame.rows()[1][1].is_null());
    }

    #[test]
    fn column() {
        let frame = people();
        assert_eq!(
            frame.column("first_name"),
            Some(Series::from(vec!["Marco", "Giovanni", "Alice", "Marco"]))
        );
        assert_eq!(frame.column("age").unwrap().mean().unwrap(), 24.5);
        assert_eq!(frame.column("invalid"), None);
    }

    #[test]
    fn select_ignores_unknown_columns() {
        let frame = people().select(&["first_name", "invalid", "age"]);
        assert_eq!(frame.headers(), headers(&["first_name", "age"]));
        assert_eq!(frame.rows()[3], vec![Value::from("Marco"), Value::from(32)]);
    }

    #[test]
    fn row_by_index() {
        let frame = people();
        assert_eq!(frame.row(0).unwrap().rows(), vec![row("Marco", "Some", 20)]);
        assert_eq!(frame.row(-2).unwrap().rows(), vec![row("Alice", "Else", 24)]);
        assert_eq!(frame.row(50), None);
        assert_eq!(frame.row(-5), None);
    }

    #[test]
    fn slice_of_rows() {
        let frame = people();
        assert_eq!(
            frame.slice(1..=2).rows(),
            vec![row("Giovanni", "Thing", 22), row("Alice", "Else", 24)]
        );
        assert_eq!(frame.slice(3..10).n_rows(), 1);
        assert_eq!(frame.slice(7..).n_rows(), 0);
    }

    #[test]
    fn take_ignores_out_of_range() {
        let frame = people();
        assert_eq!(
            frame.take(&[1, 3, 8]).rows(),
            vec![row("Giovanni", "Thing", 22), row("Marco", "Qwerty", 32)]
        );
    }
}
