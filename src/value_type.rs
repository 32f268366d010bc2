use core::ffi::c_int;
use core::fmt;

use crate::ffi;

/// The storage class of a column in the current row.
///
/// See [`Statement::column_type`].
///
/// [`Statement::column_type`]: crate::Statement::column_type
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, ValueType};
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE test (id INTEGER, name TEXT, score REAL, photo BLOB, email TEXT);
///     INSERT INTO test VALUES (1, 'Alice', 4.5, X'4269', NULL);
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT * FROM test")?;
/// assert!(stmt.step()?.is_row());
///
/// assert_eq!(stmt.column_type(0), ValueType::INTEGER);
/// assert_eq!(stmt.column_type(1), ValueType::TEXT);
/// assert_eq!(stmt.column_type(2), ValueType::FLOAT);
/// assert_eq!(stmt.column_type(3), ValueType::BLOB);
/// assert_eq!(stmt.column_type(4), ValueType::NULL);
/// # Ok::<_, sqlbind::Error>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct ValueType {
    raw: c_int,
}

impl ValueType {
    /// Construct from a raw type.
    #[inline]
    pub(crate) const fn new(raw: c_int) -> Self {
        Self { raw }
    }

    /// The integer storage class, read losslessly as an [`i64`].
    pub const INTEGER: Self = Self::new(ffi::SQLITE_INTEGER as c_int);

    /// The floating-point storage class, read losslessly as an [`f64`].
    pub const FLOAT: Self = Self::new(ffi::SQLITE_FLOAT as c_int);

    /// The text storage class.
    pub const TEXT: Self = Self::new(ffi::SQLITE_TEXT as c_int);

    /// The blob storage class.
    pub const BLOB: Self = Self::new(ffi::SQLITE_BLOB as c_int);

    /// The null storage class.
    ///
    /// This is also what every column reports when no row is available.
    pub const NULL: Self = Self::new(ffi::SQLITE_NULL as c_int);

    fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::INTEGER => "INTEGER",
            Self::FLOAT => "FLOAT",
            Self::TEXT => "TEXT",
            Self::BLOB => "BLOB",
            Self::NULL => "NULL",
            _ => return None,
        };

        Some(name)
    }
}

/// Display implementation for [`ValueType`].
///
/// # Examples
///
/// ```
/// use sqlbind::ValueType;
///
/// assert_eq!(ValueType::INTEGER.to_string(), "INTEGER");
/// assert_eq!(ValueType::FLOAT.to_string(), "FLOAT");
/// assert_eq!(ValueType::TEXT.to_string(), "TEXT");
/// assert_eq!(ValueType::BLOB.to_string(), "BLOB");
/// assert_eq!(ValueType::NULL.to_string(), "NULL");
/// ```
impl fmt::Display for ValueType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN({})", self.raw),
        }
    }
}

impl fmt::Debug for ValueType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
