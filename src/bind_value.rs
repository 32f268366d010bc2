use core::ffi::{CStr, c_char, c_int, c_uchar, c_void};
use core::mem::size_of;

use alloc::ffi::CString;
use alloc::string::String;
use alloc::vec::Vec;

use crate::ffi;
use crate::utils::sqlite3_try;
use crate::value::Kind;
use crate::{Null, Result, Statement, Value};

/// A type suitable for binding to a parameter of a prepared statement.
///
/// This is typically used indirectly via [`bind`] or [`execute`], which bind
/// a whole tuple of values at consecutive positions.
///
/// Parameter indexes are 1-based. Text and blobs are copied by sqlite when
/// bound, so the bound value does not have to outlive the call.
///
/// [`bind`]: crate::Statement::bind
/// [`execute`]: crate::Statement::execute
///
/// # Examples
///
/// Custom types implement this trait by delegating to the type they are
/// stored as.
///
/// ```
/// use core::ffi::c_int;
///
/// use sqlbind::{BindValue, Database, Result, Statement};
///
/// struct Id([u8; 8]);
///
/// impl BindValue for Id {
///     #[inline]
///     fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
///         self.0.bind_value(stmt, index)
///     }
/// }
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE ids (id BLOB NOT NULL)", ())?;
/// db.execute("INSERT INTO ids (id) VALUES (?)", (Id(*b"abcdabcd"),))?;
///
/// let mut stmt = db.prepare("SELECT length(id) FROM ids")?;
/// let mut len = 0i64;
/// assert!(stmt.fetch(&mut len)?);
/// assert_eq!(len, 8);
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub trait BindValue {
    /// Bind this value to the parameter at `index`.
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()>;
}

impl<T> BindValue for &T
where
    T: ?Sized + BindValue,
{
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        (**self).bind_value(stmt, index)
    }
}

fn bind_null(stmt: &mut Statement, index: c_int) -> Result<()> {
    unsafe {
        sqlite3_try! {
            stmt.connection_ptr(),
            ffi::sqlite3_bind_null(stmt.as_ptr(), index)
        };
    }

    Ok(())
}

fn bind_int(stmt: &mut Statement, index: c_int, value: c_int) -> Result<()> {
    unsafe {
        sqlite3_try! {
            stmt.connection_ptr(),
            ffi::sqlite3_bind_int(stmt.as_ptr(), index, value)
        };
    }

    Ok(())
}

fn bind_int64(stmt: &mut Statement, index: c_int, value: i64) -> Result<()> {
    unsafe {
        sqlite3_try! {
            stmt.connection_ptr(),
            ffi::sqlite3_bind_int64(stmt.as_ptr(), index, value as ffi::sqlite3_int64)
        };
    }

    Ok(())
}

fn bind_double(stmt: &mut Statement, index: c_int, value: f64) -> Result<()> {
    unsafe {
        sqlite3_try! {
            stmt.connection_ptr(),
            ffi::sqlite3_bind_double(stmt.as_ptr(), index, value)
        };
    }

    Ok(())
}

/// Bind UTF-8 text which sqlite copies before returning.
fn bind_text(stmt: &mut Statement, index: c_int, text: &[u8]) -> Result<()> {
    unsafe {
        sqlite3_try! {
            stmt.connection_ptr(),
            ffi::sqlite3_bind_text64(
                stmt.as_ptr(),
                index,
                text.as_ptr().cast::<c_char>(),
                text.len() as ffi::sqlite3_uint64,
                ffi::SQLITE_TRANSIENT(),
                ffi::SQLITE_UTF8 as c_uchar,
            )
        };
    }

    Ok(())
}

/// Bind a blob which sqlite copies before returning.
fn bind_blob(stmt: &mut Statement, index: c_int, bytes: &[u8]) -> Result<()> {
    unsafe {
        sqlite3_try! {
            stmt.connection_ptr(),
            ffi::sqlite3_bind_blob64(
                stmt.as_ptr(),
                index,
                bytes.as_ptr().cast::<c_void>(),
                bytes.len() as ffi::sqlite3_uint64,
                ffi::SQLITE_TRANSIENT(),
            )
        };
    }

    Ok(())
}

/// [`BindValue`] implementation for [`Null`].
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, Null};
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE users (name TEXT, age INTEGER);
///     INSERT INTO users (name, age) VALUES ('Alice', NULL), ('Bob', 30);
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT name FROM users WHERE age IS ?")?;
/// stmt.execute((Null,))?;
///
/// let mut name = String::new();
/// assert!(stmt.fetch(&mut name)?);
/// assert_eq!(name, "Alice");
/// assert!(!stmt.fetch(&mut name)?);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl BindValue for Null {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_null(stmt, index)
    }
}

/// [`BindValue`] implementation for [`Option`], where [`None`] binds NULL.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
///
/// let mut insert = db.prepare("INSERT INTO users (name, age) VALUES (?, ?)")?;
/// insert.execute(("Alice", None::<i64>))?;
/// insert.execute(("Bob", Some(30)))?;
///
/// let mut stmt = db.prepare("SELECT count(*) FROM users WHERE age IS NULL")?;
/// let mut count = 0i64;
/// assert!(stmt.fetch(&mut count)?);
/// assert_eq!(count, 1);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl<T> BindValue for Option<T>
where
    T: BindValue,
{
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        match self {
            Some(value) => value.bind_value(stmt, index),
            None => bind_null(stmt, index),
        }
    }
}

/// [`BindValue`] implementation for a dynamic [`Value`].
impl BindValue for Value {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        match self.kind() {
            Kind::Null => bind_null(stmt, index),
            Kind::Integer(value) => bind_int64(stmt, index, *value),
            Kind::Float(value) => bind_double(stmt, index, *value),
            Kind::Text(value) => bind_text(stmt, index, value.as_bytes()),
            Kind::Blob(value) => bind_blob(stmt, index, value),
        }
    }
}

/// [`BindValue`] implementation for string slices.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE english (value TEXT);
///     INSERT INTO english VALUES ('cerotype'), ('metatype'), ('nonsence');
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT count(*) FROM english WHERE value LIKE ?")?;
/// stmt.execute(("%type",))?;
///
/// let mut count = 0i64;
/// assert!(stmt.fetch(&mut count)?);
/// assert_eq!(count, 2);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl BindValue for str {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_text(stmt, index, self.as_bytes())
    }
}

/// [`BindValue`] implementation for [`String`].
impl BindValue for String {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_str().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for null-terminated text.
///
/// The terminator is not part of the bound value.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE users (name TEXT)", ())?;
/// db.execute("INSERT INTO users (name) VALUES (?)", (c"Alice",))?;
///
/// let mut stmt = db.prepare("SELECT name, length(name) FROM users")?;
/// let mut name = String::new();
/// let mut len = 0u32;
/// assert!(stmt.fetch((&mut name, &mut len))?);
/// assert_eq!((name.as_str(), len), ("Alice", 5));
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl BindValue for CStr {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_text(stmt, index, self.to_bytes())
    }
}

/// [`BindValue`] implementation for [`CString`].
impl BindValue for CString {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_c_str().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for byte slices, bound as a blob.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE files (id INTEGER, data BLOB);
///     INSERT INTO files (id, data) VALUES (0, X'48656C6C6F20576F726C6421');
///     INSERT INTO files (id, data) VALUES (1, X'48656C6C6F');
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT id FROM files WHERE data = ?")?;
/// stmt.execute((&b"Hello"[..],))?;
///
/// let mut id = 0i64;
/// assert!(stmt.fetch(&mut id)?);
/// assert_eq!(id, 1);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl BindValue for [u8] {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_blob(stmt, index, self)
    }
}

/// [`BindValue`] implementation for byte arrays, bound as a blob.
impl<const N: usize> BindValue for [u8; N] {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_slice().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for a [`Vec<u8>`], bound as a blob.
impl BindValue for Vec<u8> {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        self.as_slice().bind_value(stmt, index)
    }
}

/// [`BindValue`] implementation for [`f64`].
impl BindValue for f64 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_double(stmt, index, *self)
    }
}

/// [`BindValue`] implementation for [`f32`], widened to double precision.
impl BindValue for f32 {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_double(stmt, index, f64::from(*self))
    }
}

/// [`BindValue`] implementation for [`bool`], stored as the integer `0` or
/// `1`.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE flags (value INTEGER)", ())?;
/// db.execute("INSERT INTO flags (value) VALUES (?), (?)", (true, false))?;
///
/// let mut stmt = db.prepare("SELECT value FROM flags ORDER BY rowid")?;
/// let mut value = 0i64;
/// assert!(stmt.fetch(&mut value)?);
/// assert_eq!(value, 1);
/// assert!(stmt.fetch(&mut value)?);
/// assert_eq!(value, 0);
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl BindValue for bool {
    #[inline]
    fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
        bind_int(stmt, index, c_int::from(*self))
    }
}

macro_rules! integer {
    ($($ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("[`BindValue`] implementation for `", stringify!($ty), "`.")]
            ///
            /// Types narrower than 64 bits are bound through sqlite's 32-bit
            /// integer interface, wider types through the 64-bit one. Values
            /// are converted with `as`, so unsigned values which do not fit
            /// are stored with their bits reinterpreted and read back intact.
            impl BindValue for $ty {
                #[inline]
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_lossless)]
                fn bind_value(&self, stmt: &mut Statement, index: c_int) -> Result<()> {
                    if size_of::<$ty>() < size_of::<i64>() {
                        bind_int(stmt, index, *self as c_int)
                    } else {
                        bind_int64(stmt, index, *self as i64)
                    }
                }
            }
        )*
    };
}

integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
