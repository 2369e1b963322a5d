use crate::table::Table;

/// Request entry that selects every column of the table in table order.
pub const ALL_COLUMNS: &str = "All columns";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("column '{column}' not found in table")]
    InvalidSelection { column: String },
}

/// Ordered, duplicate-free subset of a table's column names.
///
/// An empty selection is valid; downstream stages treat it as "nothing to do".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    /// Derives a selection from the requested column names.
    ///
    /// If the request contains [`ALL_COLUMNS`], every column is selected in table
    /// order. Otherwise the request order is kept and repeated names collapse onto
    /// their first occurrence.
    pub fn select<S>(table: &Table, requested: &[S]) -> Result<Self, SelectionError>
    where
        S: AsRef<str>,
    {
        if requested.iter().any(|name| name.as_ref() == ALL_COLUMNS) {
            return Ok(Self::all(table));
        }

        let mut names: Vec<String> = Vec::with_capacity(requested.len());
        for name in requested {
            let name = name.as_ref();
            if !table.contains(name) {
                return Err(SelectionError::InvalidSelection {
                    column: name.to_owned(),
                });
            }
            if !names.iter().any(|n| n == name) {
                names.push(name.to_owned());
            }
        }
        Ok(Self { names })
    }

    /// Selects every column of the table.
    #[must_use]
    pub fn all(table: &Table) -> Self {
        Self {
            names: table.column_names().map(str::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}
