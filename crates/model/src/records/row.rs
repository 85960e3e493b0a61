use crate::{
    core::{errors::ModelError, value::Cell},
    records::columns::ColumnSet,
};

/// One result row, positionally aligned with its [`ColumnSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row(Vec<Cell>);

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row(cells)
    }

    /// Builds a row and checks it against the column set of its result.
    pub fn aligned(columns: &ColumnSet, cells: Vec<Cell>) -> Result<Self, ModelError> {
        if cells.len() != columns.len() {
            return Err(ModelError::ColumnCount {
                expected: columns.len(),
                found: cells.len(),
            });
        }
        Ok(Row(cells))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
