use core::ffi::c_int;
use core::mem::size_of;
use core::ptr;
use core::slice;

use alloc::string::String;
use alloc::vec::Vec;

use crate::ffi;
use crate::{Null, Result, Statement, Value, ValueType};

/// A type which can be populated from a column of the current row.
///
/// Reading is in-place, so buffers like [`String`] and [`Vec<u8>`] are reused
/// across rows. Column indexes are 0-based. Reading from a statement which has
/// no row available leaves unspecified, but valid, contents behind.
///
/// This is typically used indirectly through [`fetch`], [`columns`] or
/// [`column`].
///
/// [`fetch`]: crate::Statement::fetch
/// [`columns`]: crate::Statement::columns
/// [`column`]: crate::Statement::column
///
/// # Examples
///
/// ```
/// use core::ffi::c_int;
///
/// use sqlbind::{Database, ReadColumn, Result, Statement};
///
/// #[derive(Default)]
/// struct Celsius(f64);
///
/// impl ReadColumn for Celsius {
///     #[inline]
///     fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
///         self.0.read_column(stmt, index)
///     }
/// }
///
/// let db = Database::open_in_memory()?;
/// let mut stmt = db.prepare("SELECT 21.5")?;
///
/// let mut temperature = Celsius::default();
/// assert!(stmt.fetch(&mut temperature)?);
/// assert_eq!(temperature.0, 21.5);
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub trait ReadColumn {
    /// Populate `self` from the column at `index`.
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()>;
}

/// Reading into [`Null`] skips the column.
impl ReadColumn for Null {
    #[inline]
    fn read_column(&mut self, _: &Statement, _: c_int) -> Result<()> {
        Ok(())
    }
}

/// [`ReadColumn`] implementation for [`Option`].
///
/// A NULL column produces [`None`], anything else produces a freshly
/// constructed value populated from the column.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE users (name TEXT, age INTEGER);
///     INSERT INTO users (name, age) VALUES ('Alice', NULL), ('Bob', 30);
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT name, age FROM users ORDER BY name")?;
///
/// let mut name = String::new();
/// let mut age = Some(0i64);
///
/// assert!(stmt.fetch((&mut name, &mut age))?);
/// assert_eq!((name.as_str(), age), ("Alice", None));
///
/// assert!(stmt.fetch((&mut name, &mut age))?);
/// assert_eq!((name.as_str(), age), ("Bob", Some(30)));
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl<T> ReadColumn for Option<T>
where
    T: Default + ReadColumn,
{
    #[inline]
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        if stmt.column_type(index) == ValueType::NULL {
            *self = None;
            return Ok(());
        }

        let mut value = T::default();
        value.read_column(stmt, index)?;
        *self = Some(value);
        Ok(())
    }
}

/// [`ReadColumn`] implementation for a dynamic [`Value`], which takes on
/// whatever storage class the column has.
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, Value};
///
/// let db = Database::open_in_memory()?;
/// let mut stmt = db.prepare("SELECT 1, 2.5, 'text', X'0102', NULL")?;
///
/// let mut values: [Value; 5] = Default::default();
/// let [a, b, c, d, e] = &mut values;
/// assert!(stmt.fetch((a, b, c, d, e))?);
///
/// assert_eq!(values[0].as_integer(), Some(1));
/// assert_eq!(values[1].as_float(), Some(2.5));
/// assert_eq!(values[2].as_text(), Some("text"));
/// assert_eq!(values[3].as_blob(), Some(&[1u8, 2][..]));
/// assert!(values[4].is_null());
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl ReadColumn for Value {
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        *self = match stmt.column_type(index) {
            ValueType::INTEGER => Value::integer(unsafe {
                ffi::sqlite3_column_int64(stmt.as_ptr(), index)
            }),
            ValueType::FLOAT => Value::float(unsafe {
                ffi::sqlite3_column_double(stmt.as_ptr(), index)
            }),
            ValueType::TEXT => {
                let mut text = String::new();
                text.read_column(stmt, index)?;
                Value::text(text)
            }
            ValueType::BLOB => {
                let mut blob = Vec::new();
                blob.read_column(stmt, index)?;
                Value::blob(blob)
            }
            _ => Value::null(),
        };

        Ok(())
    }
}

/// Access the raw text of a column.
///
/// The text pointer must be requested before the length, since requesting the
/// text may convert the value and change its length.
unsafe fn column_text<'a>(stmt: &'a Statement, index: c_int) -> &'a [u8] {
    unsafe {
        let ptr = ffi::sqlite3_column_text(stmt.as_ptr(), index);

        if ptr.is_null() {
            return &[];
        }

        let len = ffi::sqlite3_column_bytes(stmt.as_ptr(), index);
        slice::from_raw_parts(ptr, usize::try_from(len).unwrap_or_default())
    }
}

/// Access the raw bytes of a blob column.
unsafe fn column_blob<'a>(stmt: &'a Statement, index: c_int) -> &'a [u8] {
    unsafe {
        let ptr = ffi::sqlite3_column_blob(stmt.as_ptr(), index);

        if ptr.is_null() {
            return &[];
        }

        let len = ffi::sqlite3_column_bytes(stmt.as_ptr(), index);
        slice::from_raw_parts(ptr.cast::<u8>(), usize::try_from(len).unwrap_or_default())
    }
}

/// [`ReadColumn`] implementation for [`String`].
///
/// The buffer is cleared and refilled with the text of the column. Invalid
/// UTF-8 is replaced with the replacement character and NULL reads as an
/// empty string.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE users (name TEXT);
///     INSERT INTO users (name) VALUES ('Alice'), ('Bob'), (NULL);
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT name FROM users ORDER BY rowid")?;
///
/// let mut name = String::new();
/// let mut names = Vec::new();
///
/// while stmt.fetch(&mut name)? {
///     names.push(name.clone());
/// }
///
/// assert_eq!(names, ["Alice", "Bob", ""]);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl ReadColumn for String {
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        let bytes = unsafe { column_text(stmt, index) };
        self.clear();
        self.push_str(&String::from_utf8_lossy(bytes));
        Ok(())
    }
}

/// [`ReadColumn`] implementation for a [`Vec<u8>`].
///
/// The vector is resized to exactly the size of the column.
impl ReadColumn for Vec<u8> {
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        let bytes = unsafe { column_blob(stmt, index) };
        self.clear();
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// [`ReadColumn`] implementation for a fixed capacity byte buffer.
///
/// At most `self.len()` bytes are copied. If the column is larger the excess is
/// dropped, if it is smaller the tail of the buffer is left untouched.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// let mut stmt = db.prepare("SELECT X'0102030405060708090A'")?;
///
/// let mut buf = [0u8; 4];
/// assert!(stmt.fetch(&mut buf[..])?);
/// assert_eq!(buf, [1, 2, 3, 4]);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl ReadColumn for [u8] {
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        let bytes = unsafe { column_blob(stmt, index) };
        let len = bytes.len().min(self.len());

        unsafe {
            ptr::copy_nonoverlapping(bytes.as_ptr(), self.as_mut_ptr(), len);
        }

        Ok(())
    }
}

/// [`ReadColumn`] implementation for byte arrays, see the implementation for
/// `[u8]`.
impl<const N: usize> ReadColumn for [u8; N] {
    #[inline]
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        self.as_mut_slice().read_column(stmt, index)
    }
}

/// [`ReadColumn`] implementation for [`f64`].
impl ReadColumn for f64 {
    #[inline]
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        *self = unsafe { ffi::sqlite3_column_double(stmt.as_ptr(), index) };
        Ok(())
    }
}

/// [`ReadColumn`] implementation for [`f32`], narrowed from double precision.
impl ReadColumn for f32 {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        *self = unsafe { ffi::sqlite3_column_double(stmt.as_ptr(), index) } as f32;
        Ok(())
    }
}

/// [`ReadColumn`] implementation for [`bool`], where any nonzero integer is
/// `true`.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// let mut stmt = db.prepare("SELECT 0, 1, 7")?;
///
/// let (mut a, mut b, mut c) = (true, false, false);
/// assert!(stmt.fetch((&mut a, &mut b, &mut c))?);
/// assert_eq!((a, b, c), (false, true, true));
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl ReadColumn for bool {
    #[inline]
    fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
        *self = unsafe { ffi::sqlite3_column_int64(stmt.as_ptr(), index) } != 0;
        Ok(())
    }
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("[`ReadColumn`] implementation for `", stringify!($ty), "`.")]
            impl ReadColumn for $ty {
                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_lossless)]
                fn read_column(&mut self, stmt: &Statement, index: c_int) -> Result<()> {
                    *self = unsafe {
                        if size_of::<$ty>() < size_of::<i64>() {
                            ffi::sqlite3_column_int(stmt.as_ptr(), index) as $ty
                        } else {
                            ffi::sqlite3_column_int64(stmt.as_ptr(), index) as $ty
                        }
                    };

                    Ok(())
                }
            }
        )*
    };
}

integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
