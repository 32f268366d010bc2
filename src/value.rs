use core::fmt;

use alloc::string::String;
use alloc::vec::Vec;

use crate::ValueType;

/// A marker type representing a NULL value.
///
/// Binding it binds NULL, reading into it skips the column.
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, Null};
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
/// db.execute("INSERT INTO users (name, age) VALUES (?, ?)", ("Alice", Null))?;
///
/// let mut stmt = db.prepare("SELECT name, age FROM users")?;
/// let mut name = String::new();
/// assert!(stmt.fetch((&mut name, &mut Null))?);
/// assert_eq!(name, "Alice");
/// # Ok::<_, sqlbind::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Null;

/// An owned dynamic value.
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, Value};
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE test (value);
///     INSERT INTO test (value) VALUES ('Hello, world!'), (42), (3.14), (X'DEADBEEF'), (NULL);
/// "#)?;
///
/// let mut select = db.prepare("SELECT value FROM test ORDER BY rowid")?;
/// let mut value = Value::null();
/// let mut values = Vec::new();
///
/// while select.fetch(&mut value)? {
///     values.push(value.clone());
/// }
///
/// assert_eq!(values, [
///     Value::text("Hello, world!"),
///     Value::integer(42),
///     Value::float(3.14),
///     Value::blob([0xDEu8, 0xAD, 0xBE, 0xEF]),
///     Value::null(),
/// ]);
/// # Ok::<_, sqlbind::Error>(())
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct Value {
    kind: Kind,
}

#[derive(Clone, PartialEq, Default)]
pub(crate) enum Kind {
    #[default]
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    #[inline]
    pub(crate) fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Construct a NULL value.
    #[inline]
    pub const fn null() -> Self {
        Self { kind: Kind::Null }
    }

    /// Construct an integer value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Value;
    ///
    /// let value = Value::integer(42);
    /// assert_eq!(value.as_integer(), Some(42));
    /// ```
    #[inline]
    pub const fn integer(value: i64) -> Self {
        Self {
            kind: Kind::Integer(value),
        }
    }

    /// Construct a float value.
    #[inline]
    pub const fn float(value: f64) -> Self {
        Self {
            kind: Kind::Float(value),
        }
    }

    /// Construct a text value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Value;
    ///
    /// let value = Value::text("hello");
    /// assert_eq!(value.as_text(), Some("hello"));
    /// assert_eq!(value.as_blob(), None);
    /// ```
    #[inline]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: Kind::Text(value.into()),
        }
    }

    /// Construct a blob value.
    #[inline]
    pub fn blob(value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: Kind::Blob(value.into()),
        }
    }

    /// Test if the value is NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self.kind, Kind::Null)
    }

    /// Return the integer if the value is an integer.
    #[inline]
    pub const fn as_integer(&self) -> Option<i64> {
        if let Kind::Integer(value) = self.kind {
            return Some(value);
        }

        None
    }

    /// Return the floating-point number if the value is a float.
    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        if let Kind::Float(value) = self.kind {
            return Some(value);
        }

        None
    }

    /// Return the string if the value is text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        if let Kind::Text(value) = &self.kind {
            return Some(value);
        }

        None
    }

    /// Return the binary data if the value is a blob.
    #[inline]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Kind::Blob(value) = &self.kind {
            return Some(value);
        }

        None
    }

    /// Return the storage class of the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Value, ValueType};
    ///
    /// assert_eq!(Value::null().value_type(), ValueType::NULL);
    /// assert_eq!(Value::integer(1).value_type(), ValueType::INTEGER);
    /// assert_eq!(Value::float(1.0).value_type(), ValueType::FLOAT);
    /// assert_eq!(Value::text("a").value_type(), ValueType::TEXT);
    /// assert_eq!(Value::blob([1u8]).value_type(), ValueType::BLOB);
    /// ```
    #[inline]
    pub const fn value_type(&self) -> ValueType {
        match &self.kind {
            Kind::Null => ValueType::NULL,
            Kind::Integer(_) => ValueType::INTEGER,
            Kind::Float(_) => ValueType::FLOAT,
            Kind::Text(_) => ValueType::TEXT,
            Kind::Blob(_) => ValueType::BLOB,
        }
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Self::integer(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<Vec<u8>> for Value {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Self::blob(value)
    }
}

impl From<Null> for Value {
    #[inline]
    fn from(Null: Null) -> Self {
        Self::null()
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::null(),
        }
    }
}

/// Debug implementation for [`Value`].
///
/// # Examples
///
/// ```
/// use sqlbind::Value;
///
/// assert_eq!(format!("{:?}", Value::null()), "NULL");
/// assert_eq!(format!("{:?}", Value::integer(42)), "42");
/// assert_eq!(format!("{:?}", Value::float(3.14)), "3.14");
/// assert_eq!(format!("{:?}", Value::text("hello")), "\"hello\"");
/// assert_eq!(format!("{:?}", Value::blob([0xDEu8, 0xAD])), "b\"\\xde\\xad\"");
/// ```
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Null => write!(f, "NULL"),
            Kind::Integer(value) => write!(f, "{value}"),
            Kind::Float(value) => write!(f, "{value}"),
            Kind::Text(value) => write!(f, "{value:?}"),
            Kind::Blob(value) => {
                write!(f, "b\"")?;

                for byte in value {
                    write!(f, "\\x{byte:02x}")?;
                }

                write!(f, "\"")
            }
        }
    }
}
