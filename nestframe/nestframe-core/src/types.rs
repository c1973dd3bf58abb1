//! Semantic types of value columns and the subtype lattice over them.

use std::fmt::{self, Display, Formatter};

use crate::{error::ValueTypeError, value::Value};

/// Structural type of the elements of a value column.
///
/// `Nothing` is the bottom type (an empty or all-null column), `Any` the top.
/// Every numeric type is a subtype of `Number`, and `List` is covariant in its
/// element type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Nothing,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Number,
    List(Box<ValueType>),
    Any,
}

impl DataType {
    pub fn list(element: ValueType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            DataType::I8
                | DataType::I16
                | DataType::I32
                | DataType::I64
                | DataType::F32
                | DataType::F64
                | DataType::Number
        )
    }

    /// Concrete primitive number type (excludes the mixed `Number`).
    pub fn is_primitive_number(&self) -> bool {
        self.is_number() && *self != DataType::Number
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::I8 | DataType::I16 | DataType::I32 | DataType::I64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, DataType::F32 | DataType::F64)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Nothing => "nothing",
            DataType::Bool => "bool",
            DataType::I8 => "i8",
            DataType::I16 => "i16",
            DataType::I32 => "i32",
            DataType::I64 => "i64",
            DataType::F32 => "f32",
            DataType::F64 => "f64",
            DataType::String => "string",
            DataType::Number => "number",
            DataType::List(_) => "list",
            DataType::Any => "any",
        }
    }

    pub fn is_subtype_of(&self, other: &DataType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (DataType::Nothing, _) | (_, DataType::Any) => true,
            (s, DataType::Number) => s.is_number(),
            (DataType::List(a), DataType::List(b)) => a.is_subtype_of(b),
            _ => false,
        }
    }

    /// Narrowest common supertype of two types.
    pub fn common(&self, other: &DataType) -> DataType {
        if self.is_subtype_of(other) {
            return other.clone();
        }
        if other.is_subtype_of(self) {
            return self.clone();
        }
        match (self, other) {
            (a, b) if a.is_number() && b.is_number() => DataType::Number,
            (DataType::List(a), DataType::List(b)) => DataType::list(a.common_with(b)),
            _ => DataType::Any,
        }
    }

    /// Zero of a primitive number type.
    pub fn zero(&self) -> Option<Value> {
        Some(match self {
            DataType::I8 => Value::I8(0),
            DataType::I16 => Value::I16(0),
            DataType::I32 => Value::I32(0),
            DataType::I64 => Value::I64(0),
            DataType::F32 => Value::F32(0.0),
            DataType::F64 => Value::F64(0.0),
            _ => return None,
        })
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DataType::List(element) => write!(f, "list<{element}>"),
            other => f.write_str(other.type_name()),
        }
    }
}

/// Unified number type of two primitive number types.
///
/// Integers widen to the wider integer; `f32` with `f32` stays `f32`; any
/// other mix containing a float becomes `f64`. `Nothing` is the identity.
/// Returns `None` when either side is not a primitive number.
pub fn unify_numbers(a: &DataType, b: &DataType) -> Option<DataType> {
    fn int_rank(t: &DataType) -> u8 {
        match t {
            DataType::I8 => 0,
            DataType::I16 => 1,
            DataType::I32 => 2,
            _ => 3,
        }
    }

    match (a, b) {
        (DataType::Nothing, t) | (t, DataType::Nothing) if t.is_primitive_number() => {
            Some(t.clone())
        }
        (DataType::Nothing, DataType::Nothing) => Some(DataType::Nothing),
        (a, b) if !a.is_primitive_number() || !b.is_primitive_number() => None,
        (DataType::F32, DataType::F32) => Some(DataType::F32),
        (a, b) if a.is_float() || b.is_float() => Some(DataType::F64),
        (a, b) => Some(if int_rank(a) >= int_rank(b) {
            a.clone()
        } else {
            b.clone()
        }),
    }
}

/// Unified number type of a set of types; see [`unify_numbers`].
pub fn unify_all_numbers<'a>(types: impl IntoIterator<Item = &'a DataType>) -> Option<DataType> {
    types
        .into_iter()
        .try_fold(DataType::Nothing, |acc, t| unify_numbers(&acc, t))
}

/// A [`DataType`] together with its nullability; the element type of a value column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueType {
    pub data_type: DataType,
    pub nullable: bool,
}

impl ValueType {
    pub fn new(data_type: DataType, nullable: bool) -> Self {
        Self {
            data_type,
            nullable,
        }
    }

    pub fn non_null(data_type: DataType) -> Self {
        Self::new(data_type, false)
    }

    pub fn nullable(data_type: DataType) -> Self {
        Self::new(data_type, true)
    }

    pub fn nothing() -> Self {
        Self::non_null(DataType::Nothing)
    }

    pub fn with_nullable(&self, nullable: bool) -> Self {
        Self::new(self.data_type.clone(), nullable)
    }

    pub fn is_subtype_of(&self, other: &ValueType) -> bool {
        (!self.nullable || other.nullable) && self.data_type.is_subtype_of(&other.data_type)
    }

    pub fn common_with(&self, other: &ValueType) -> ValueType {
        ValueType::new(
            self.data_type.common(&other.data_type),
            self.nullable || other.nullable,
        )
    }

    /// Narrowest common supertype of all given types; `nothing` for an empty input.
    pub fn common(types: impl IntoIterator<Item = ValueType>) -> ValueType {
        types
            .into_iter()
            .fold(ValueType::nothing(), |acc, t| acc.common_with(&t))
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data_type)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Rust types that can be stored in, and read back from, a value column.
pub trait CellType: Sized {
    fn data_type() -> DataType;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Result<Option<Self>, ValueTypeError>;
}

macro_rules! cell_type {
    ($t:ty, $variant:ident, $data_type:ident, $accessor:ident) => {
        impl CellType for $t {
            fn data_type() -> DataType {
                DataType::$data_type
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Result<Option<Self>, ValueTypeError> {
                value.$accessor()
            }
        }
    };
}

cell_type!(bool, Bool, Bool, try_bool);
cell_type!(i8, I8, I8, try_i8);
cell_type!(i16, I16, I16, try_i16);
cell_type!(i32, I32, I32, try_i32);
cell_type!(i64, I64, I64, try_i64);
cell_type!(f32, F32, F32, try_f32);
cell_type!(f64, F64, F64, try_f64);

impl CellType for String {
    fn data_type() -> DataType {
        DataType::String
    }

    fn into_value(self) -> Value {
        Value::string(self)
    }

    fn from_value(value: &Value) -> Result<Option<Self>, ValueTypeError> {
        Ok(value.try_str()?.map(str::to_owned))
    }
}

impl<T: CellType> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, CellType::into_value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
