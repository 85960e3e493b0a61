use crate::core::errors::ModelError;
use std::{collections::HashSet, sync::Arc};

/// Ordered, unique output field names of one query execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSet(Arc<[String]>);

impl ColumnSet {
    pub fn new<I, S>(names: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self(Arc::from(names)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
