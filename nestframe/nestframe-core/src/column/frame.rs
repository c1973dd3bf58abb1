use std::sync::{Arc, OnceLock};

use crate::{
    error::FrameError,
    frame::DataFrame,
    schema::{DataFrameSchema, intersect_schemas},
};

/// Column whose cells are whole DataFrames.
///
/// The nested schema is computed on first use and cached; clones share the
/// cache, so concurrent readers observe the same result. A column built with
/// [`FrameColumn::with_schema`] keeps its declared schema and nullability
/// through row operations.
#[derive(Debug, Clone)]
pub struct FrameColumn {
    name: String,
    frames: Arc<[DataFrame]>,
    schema: Arc<OnceLock<DataFrameSchema>>,
    declared: Option<Arc<Declared>>,
}

#[derive(Debug)]
struct Declared {
    schema: DataFrameSchema,
    nullable: bool,
}

impl FrameColumn {
    pub fn new(name: impl Into<String>, frames: Vec<DataFrame>) -> Self {
        Self {
            name: name.into(),
            frames: frames.into(),
            schema: Arc::new(OnceLock::new()),
            declared: None,
        }
    }

    /// Column with a declared nested schema and nullability.
    pub fn with_schema(
        name: impl Into<String>,
        frames: Vec<DataFrame>,
        schema: DataFrameSchema,
        nullable: bool,
    ) -> Self {
        Self::declared(
            name.into(),
            frames,
            Arc::new(Declared { schema, nullable }),
        )
    }

    fn declared(name: String, frames: Vec<DataFrame>, declared: Arc<Declared>) -> Self {
        Self {
            name,
            frames: frames.into(),
            schema: Arc::new(OnceLock::from(declared.schema.clone())),
            declared: Some(declared),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[DataFrame] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Result<&DataFrame, FrameError> {
        self.frames.get(index).ok_or(FrameError::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    /// Declared schema, or the intersection of the schemas of all non-empty
    /// cells.
    pub fn schema(&self) -> &DataFrameSchema {
        self.schema.get_or_init(|| {
            let schemas: Vec<DataFrameSchema> = self
                .frames
                .iter()
                .filter(|frame| frame.ncol() > 0)
                .map(DataFrame::schema)
                .collect();
            tracing::trace!(
                column = %self.name,
                cells = self.frames.len(),
                "computing nested frame schema"
            );
            intersect_schemas(&schemas)
        })
    }

    /// Declared nullability, or whether any cell is absent (a frame with
    /// neither columns nor rows).
    pub fn nullable(&self) -> bool {
        match &self.declared {
            Some(declared) => declared.nullable,
            None => self.frames.iter().any(DataFrame::is_absent),
        }
    }

    pub fn is_declared(&self) -> bool {
        self.declared.is_some()
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Arc::clone(&self.frames),
            schema: Arc::clone(&self.schema),
            declared: self.declared.clone(),
        }
    }

    /// Cells at `indices`. A declared schema carries over; otherwise the
    /// subset gets a fresh schema cache.
    pub fn take(&self, indices: &[usize]) -> Result<Self, FrameError> {
        let frames = indices
            .iter()
            .map(|&i| self.get(i).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match &self.declared {
            Some(declared) => Self::declared(self.name.clone(), frames, Arc::clone(declared)),
            None => Self::new(self.name.clone(), frames),
        })
    }

    /// Cells of all `parts` in order.
    ///
    /// If any part has a declared schema, the result is declared with the
    /// intersection of the parts' schemas (undeclared parts holding only
    /// absent cells do not take part) and is nullable if any part is.
    pub(crate) fn concat(name: &str, parts: &[&FrameColumn]) -> Self {
        let frames: Vec<DataFrame> = parts
            .iter()
            .flat_map(|part| part.frames.iter().cloned())
            .collect();
        if !parts.iter().any(|part| part.is_declared()) {
            return Self::new(name, frames);
        }
        let schemas: Vec<&DataFrameSchema> = parts
            .iter()
            .filter(|part| part.is_declared() || part.frames.iter().any(|f| f.ncol() > 0))
            .map(|part| part.schema())
            .collect();
        let nullable = parts.iter().any(|part| part.nullable());
        Self::with_schema(name, frames, intersect_schemas(schemas), nullable)
    }
}
