use crate::frame::DataFrame;
use crate::model::Value;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Data set description.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Columns of the data set, in display order.
    pub columns: Vec<ColumnConfig>,
}

/// Single named column.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub name: String,
    pub values: Vec<Value>,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all columns before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the columns are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Build the [`DataFrame`] described by this config.
    pub fn into_frame(self) -> Result<DataFrame> {
        let columns = self
            .columns
            .into_iter()
            .map(|column| (column.name, column.values))
            .collect();
        DataFrame::from_columns(columns).context("failed to construct data frame")
    }

    fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            bail!("config must have at least one column");
        }

        let n_rows = self.columns[0].values.len();
        for (i_col, column) in self.columns.iter().enumerate() {
            check_name(&column.name, &self.columns[..i_col])
                .with_context(|| format!("invalid name of column {i_col}"))?;
            check_len(&column.values, n_rows)
                .with_context(|| format!("invalid values of column {:?}", column.name))?;
        }

        Ok(())
    }
}

fn check_name(name: &str, prev_columns: &[ColumnConfig]) -> Result<()> {
    if name.is_empty() {
        bail!("name must not be empty");
    }
    if prev_columns.iter().any(|column| column.name == name) {
        bail!("name {name:?} is used by another column");
    }
    Ok(())
}

fn check_len(values: &[Value], exp_len: usize) -> Result<()> {
    let len = values.len();
    if len != exp_len {
        bail!("column length must be {exp_len}, but is {len}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<Config> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn mixed_value_kinds() {
        let config = parse(
            r#"
[[columns]]
name = "first_name"
values = ["Marco", "Giovanni"]

[[columns]]
name = "age"
values = [20, 22.5]

[[columns]]
name = "student"
values = [true, false]
"#,
        )
        .unwrap();

        assert_eq!(
            config.columns[1].values,
            vec![Value::Int(20), Value::Float(22.5)]
        );
        assert_eq!(config.columns[2].values, vec![Value::Bool(true), Value::Bool(false)]);

        let frame = config.into_frame().unwrap();
        assert_eq!(frame.headers(), ["first_name", "age", "student"]);
        assert_eq!(frame.n_rows(), 2);
    }

    #[test]
    fn no_columns() {
        assert!(parse("columns = []").is_err());
    }

    #[test]
    fn repeated_name() {
        let res = parse(
            r#"
[[columns]]
name = "age"
values = [1]

[[columns]]
name = "age"
values = [2]
"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn uneven_lengths() {
        let res = parse(
            r#"
[[columns]]
name = "a"
values = [1, 2]

[[columns]]
name = "b"
values = [3]
"#,
        );
        let err = res.unwrap_err();
        assert!(format!("{err:#}").contains("column length must be 2, but is 1"));
    }
}
