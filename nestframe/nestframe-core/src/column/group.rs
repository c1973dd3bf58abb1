use crate::{
    error::FrameError,
    frame::{DataFrame, DataRow},
};

/// Column whose cells are rows of one child DataFrame with the same row count.
#[derive(Debug, Clone)]
pub struct GroupColumn {
    name: String,
    frame: DataFrame,
}

impl GroupColumn {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.frame.nrow()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn get(&self, index: usize) -> Result<DataRow<'_>, FrameError> {
        self.frame.row(index)
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.frame.clone())
    }

    pub fn take(&self, indices: &[usize]) -> Result<Self, FrameError> {
        Ok(Self::new(self.name.clone(), self.frame.take(indices)?))
    }
}
