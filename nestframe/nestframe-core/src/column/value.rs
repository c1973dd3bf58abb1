use std::sync::Arc;

use crate::{
    error::{FrameError, ValueTypeError},
    types::{CellType, DataType, ValueType},
    value::Value,
};

/// Column of scalar cells sharing one element type.
///
/// Cell data is reference counted; slicing and renaming never copy the
/// values of an untouched column.
#[derive(Debug, Clone)]
pub struct ValueColumn {
    name: String,
    value_type: ValueType,
    values: Arc<[Value]>,
}

impl ValueColumn {
    /// Column with element type `data_type`; nullable iff a `Null` is present.
    ///
    /// Fails with [`FrameError::SchemaViolation`] if a value is not a subtype
    /// of `data_type`.
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        values: Vec<Value>,
    ) -> Result<Self, FrameError> {
        let nullable = values.iter().any(Value::is_null);
        Self::with_type(name, ValueType::new(data_type, nullable), values)
    }

    /// Column with a declared element type. A nullable type may hold no nulls;
    /// a non-null type must not hold any.
    pub fn with_type(
        name: impl Into<String>,
        value_type: ValueType,
        values: Vec<Value>,
    ) -> Result<Self, FrameError> {
        let name = name.into();
        if let Some(bad) = values
            .iter()
            .find(|v| !v.value_type().is_subtype_of(&value_type))
        {
            return Err(FrameError::violation(format!(
                "value '{bad}' of type {} does not fit column '{name}' of type {value_type}",
                bad.value_type()
            )));
        }
        Ok(Self {
            name,
            value_type,
            values: values.into(),
        })
    }

    /// Column whose element type is the common type of its values.
    pub fn infer(name: impl Into<String>, values: Vec<Value>) -> Self {
        let value_type = ValueType::common(values.iter().map(Value::value_type));
        Self {
            name: name.into(),
            value_type,
            values: values.into(),
        }
    }

    /// Typed constructor from optional cells.
    pub fn from_cells<T: CellType>(
        name: impl Into<String>,
        cells: impl IntoIterator<Item = Option<T>>,
    ) -> Self {
        let values: Vec<Value> = cells.into_iter().map(Value::from).collect();
        let nullable = values.iter().any(Value::is_null);
        Self {
            name: name.into(),
            value_type: ValueType::new(T::data_type(), nullable),
            values: values.into(),
        }
    }

    /// Typed constructor from non-null cells.
    pub fn from_values<T: CellType>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::from_cells(name, values.into_iter().map(Some))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element type, including nullability.
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn data_type(&self) -> &DataType {
        &self.value_type.data_type
    }

    pub fn nullable(&self) -> bool {
        self.value_type.nullable
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    pub fn get(&self, index: usize) -> Result<&Value, FrameError> {
        self.values.get(index).ok_or(FrameError::IndexOutOfRange {
            index,
            size: self.size(),
        })
    }

    /// Read every cell as `T`.
    pub fn typed<T: CellType>(&self) -> Result<Vec<Option<T>>, ValueTypeError> {
        self.values.iter().map(T::from_value).collect()
    }

    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: self.value_type.clone(),
            values: Arc::clone(&self.values),
        }
    }

    /// Rows at `indices`, in that order. The declared type is kept.
    pub fn take(&self, indices: &[usize]) -> Result<Self, FrameError> {
        let values = indices
            .iter()
            .map(|&i| self.get(i).cloned())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: self.name.clone(),
            value_type: self.value_type.clone(),
            values: values.into(),
        })
    }
}
