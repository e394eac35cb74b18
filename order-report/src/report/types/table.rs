//! Row-oriented in-memory table with an ordered, unique column list

use std::cmp::Ordering;

use super::Value;

/// Ordered sequence of records sharing one schema
///
/// Rows keep insertion order; every sort offered here is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row, addressable by column name
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a [Value],
}

impl<'a> Row<'a> {
    /// Cell for `column`, or `Null` when the column does not exist
    pub fn get(&self, column: &str) -> &'a Value {
        const NULL: &Value = &Value::Null;
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(NULL)
    }

    pub fn cells(&self) -> &'a [Value] {
        self.cells
    }
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row, padding with `Null` or truncating to the column count
    pub fn push_row(&mut self, mut cells: Vec<Value>) {
        cells.resize(self.columns.len(), Value::Null);
        self.rows.push(cells);
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    /// All values of one column, in row order (`None` if the column is absent)
    #[cfg(test)]
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Value at (`row`, `column`), `Null` when either is out of range
    #[cfg(test)]
    pub fn get(&self, row: usize, column: &str) -> &Value {
        const NULL: &Value = &Value::Null;
        match (self.rows.get(row), self.column_index(column)) {
            (Some(cells), Some(idx)) => &cells[idx],
            _ => NULL,
        }
    }

    pub(crate) fn rename_column_at(&mut self, idx: usize, to: &str) {
        if let Some(column) = self.columns.get_mut(idx) {
            *column = to.to_string();
        }
    }

    /// Remove the named columns that exist; unknown names are ignored
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.contains(&c.as_str()))
            .collect();
        self.retain_columns(&keep);
    }

    /// Keep only the columns whose flag is `true`
    pub(crate) fn retain_columns(&mut self, keep: &[bool]) {
        if keep.iter().all(|k| *k) {
            return;
        }

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));

        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// Rewrite every value of a column in place; no-op when absent
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&Value) -> Value,
    {
        if let Some(idx) = self.column_index(name) {
            for row in &mut self.rows {
                row[idx] = f(&row[idx]);
            }
        }
    }

    /// Append a column whose values are computed from each row
    ///
    /// An existing column of the same name is overwritten in place.
    pub fn derive_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(Row<'_>) -> Value,
    {
        let values: Vec<Value> = self.rows().map(&mut f).collect();

        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// New table with the rows matching `predicate`, same columns
    pub fn filter<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(Row<'_>) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|cells| {
                predicate(Row {
                    columns: &self.columns,
                    cells,
                })
            })
            .cloned()
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Keep only the first row for each key, preserving order
    pub fn retain_first_by<F>(&mut self, mut key: F)
    where
        F: FnMut(Row<'_>) -> String,
    {
        let mut seen = std::collections::HashSet::new();
        let columns = &self.columns;
        self.rows.retain(|cells| seen.insert(key(Row { columns, cells })));
    }

    /// Project to the listed columns that exist, in the listed order
    pub fn select(&self, names: &[&str]) -> Table {
        let indices: Vec<usize> = names
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();

        Table {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }

    /// Stable sort on one integer column, highest first, missing values last
    ///
    /// No-op when the column is absent.
    pub fn sort_desc_nulls_last(&mut self, name: &str) {
        let Some(idx) = self.column_index(name) else {
            return;
        };

        self.rows.sort_by(|a, b| match (sort_key(&a[idx]), sort_key(&b[idx])) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    /// Keep the first `n` rows
    pub fn truncate(&mut self, n: usize) {
        self.rows.truncate(n);
    }
}

fn sort_key(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        _ => None,
    }
}
