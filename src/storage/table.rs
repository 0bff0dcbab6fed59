//! Tables and table views.
//!
//! A `Table` owns equal-length columns; a `TableView` borrows them. The key
//! subview used for hashing is a `select()` projection: order preserving,
//! bounds-checked, duplicates permitted.

use crate::error::PartitionError;
use crate::storage::column::Column;

/// An owned columnar table.
#[derive(Debug)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Assemble a table from columns.
    ///
    /// # Panics
    /// Panics if the columns have differing lengths.
    pub fn new(columns: Vec<Column>) -> Self {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for (i, col) in columns.iter().enumerate() {
                assert_eq!(col.len(), rows, "column {} length mismatch", i);
            }
        }
        Self { columns }
    }

    /// A zero-row table with the same column types as `view`.
    pub fn empty_like(view: &TableView<'_>) -> Self {
        Self {
            columns: view.columns.iter().map(|c| Column::empty(c.dtype())).collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Borrow the whole table as a view.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            columns: self.columns.iter().collect(),
        }
    }
}

/// A borrowed view over equal-length columns.
#[derive(Clone, Debug)]
pub struct TableView<'a> {
    columns: Vec<&'a Column>,
}

impl<'a> TableView<'a> {
    /// Build a view from column references.
    ///
    /// # Panics
    /// Panics if the columns have differing lengths.
    pub fn new(columns: Vec<&'a Column>) -> Self {
        if let Some(first) = columns.first() {
            let rows = first.len();
            for (i, col) in columns.iter().enumerate() {
                assert_eq!(col.len(), rows, "column {} length mismatch", i);
            }
        }
        Self { columns }
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> &'a Column {
        self.columns[index]
    }

    pub fn columns(&self) -> &[&'a Column] {
        &self.columns
    }

    /// Project the view onto `indices`, preserving their order.
    pub fn select(&self, indices: &[usize]) -> Result<TableView<'a>, PartitionError> {
        let mut columns = Vec::with_capacity(indices.len());
        for &index in indices {
            if index >= self.columns.len() {
                return Err(PartitionError::ColumnIndexOutOfBounds {
                    index,
                    columns: self.columns.len(),
                });
            }
            columns.push(self.columns[index]);
        }
        Ok(TableView { columns })
    }

    /// Whether any column of the view carries a null bitmap.
    pub fn has_null_mask(&self) -> bool {
        self.columns.iter().any(|c| c.has_null_mask())
    }
}

impl<'a> From<&'a Table> for TableView<'a> {
    fn from(table: &'a Table) -> Self {
        table.view()
    }
}
