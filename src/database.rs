use core::ffi::{CStr, c_int};
use core::fmt;
use core::ptr;
use core::time::Duration;

use alloc::ffi::CString;

#[cfg(feature = "std")]
use std::path::Path;

use crate::error::{Error, Result};
use crate::ffi;
use crate::utils::sqlite3_try;
use crate::{Bind, Handle, OpenFlags, Statement};

/// A connection to an SQLite database.
///
/// The connection is closed when the database is dropped. Statements prepared
/// against it keep the underlying connection alive until they are dropped as
/// well.
///
/// A connection is neither [`Send`] nor [`Sync`].
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
///     INSERT INTO users VALUES ('Alice', 42);
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT age FROM users WHERE name = ?")?;
/// stmt.execute(("Alice",))?;
///
/// drop(db);
///
/// let mut age = 0u32;
/// assert!(stmt.fetch(&mut age)?);
/// assert_eq!(age, 42);
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub struct Database {
    raw: Handle<*mut ffi::sqlite3>,
}

impl Database {
    /// Open a database with the given flags.
    ///
    /// If `filename` is `None` a private in-memory database is opened.
    /// Otherwise the file is opened, or interpreted as a URI if
    /// [`OpenFlags::URI`] is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Code, Database, OpenFlags};
    ///
    /// let dir = tempfile::tempdir()?;
    /// let path = dir.path().join("database.db");
    /// let path = path.to_str().unwrap();
    ///
    /// let e = Database::open(Some(path), OpenFlags::READ_ONLY).unwrap_err();
    /// assert_eq!(e.primary_code(), Code::CANTOPEN);
    ///
    /// let db = Database::open(Some(path), OpenFlags::READ_WRITE | OpenFlags::CREATE)?;
    /// db.execute("CREATE TABLE test (value INTEGER)", ())?;
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(filename: Option<&str>, flags: OpenFlags) -> Result<Self> {
        let filename = match filename {
            Some(filename) => match CString::new(filename) {
                Ok(filename) => filename,
                Err(..) => return Err(Error::invalid_input("filename contains a nul byte")),
            },
            None => CString::from(c":memory:"),
        };

        Self::open_c_str(&filename, flags)
    }

    /// Open a private in-memory database for reading and writing.
    #[inline]
    pub fn open_in_memory() -> Result<Self> {
        Self::open(None, OpenFlags::CREATE | OpenFlags::READ_WRITE)
    }

    /// Open a database at the given path with the given flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Database, OpenFlags};
    ///
    /// let dir = tempfile::tempdir()?;
    /// let path = dir.path().join("database.db");
    ///
    /// let db = Database::open_path(&path, OpenFlags::READ_WRITE | OpenFlags::CREATE)?;
    /// db.execute("CREATE TABLE test (value INTEGER)", ())?;
    /// db.execute("INSERT INTO test VALUES (?)", (42,))?;
    /// drop(db);
    ///
    /// let db = Database::open_path(&path, OpenFlags::READ_ONLY)?;
    /// let mut stmt = db.prepare("SELECT value FROM test")?;
    ///
    /// let mut value = 0i64;
    /// assert!(stmt.fetch(&mut value)?);
    /// assert_eq!(value, 42);
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn open_path(path: impl AsRef<Path>, flags: OpenFlags) -> Result<Self> {
        let path = crate::utils::path_to_cstring(path.as_ref())?;
        Self::open_c_str(&path, flags)
    }

    fn open_c_str(filename: &CStr, flags: OpenFlags) -> Result<Self> {
        let raw = Handle::<*mut ffi::sqlite3>::new(ptr::null_mut(), |raw| unsafe {
            ffi::sqlite3_close_v2(raw);
        });

        Self::open_into(raw, filename, flags)
    }

    /// Open into an empty handle whose release routine is already armed.
    pub(crate) fn open_into(
        mut raw: Handle<*mut ffi::sqlite3>,
        filename: &CStr,
        flags: OpenFlags,
    ) -> Result<Self> {
        unsafe {
            sqlite3_try! {
                raw.get(),
                ffi::sqlite3_open_v2(
                    filename.as_ptr(),
                    raw.as_mut_ptr(),
                    flags.as_raw(),
                    ptr::null(),
                )
            };
        }

        tracing::trace!(?filename, ?flags, "opened database");
        Ok(Self { raw })
    }

    /// Return the raw connection handle.
    ///
    /// The handle remains owned by this database.
    #[inline]
    pub fn as_ptr(&self) -> *mut ffi::sqlite3 {
        self.raw.get()
    }

    /// Compile `sql` into a prepared statement.
    ///
    /// See [`Statement::new`].
    #[inline]
    pub fn prepare(&self, sql: &str) -> Result<Statement> {
        Statement::new(self, sql)
    }

    /// Prepare `sql`, bind `params` to it and take a single step.
    ///
    /// Rows produced by the statement are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// db.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
    /// db.execute("INSERT INTO users (name, age) VALUES (?, ?)", ("Alice", 42))?;
    /// assert_eq!(db.changes(), 1);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn execute<P>(&self, sql: &str, params: P) -> Result<()>
    where
        P: Bind,
    {
        let mut stmt = self.prepare(sql)?;
        stmt.execute(params)?;
        Ok(())
    }

    /// Execute one or more semicolon separated statements without binding
    /// parameters or reading rows.
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
    ///     INSERT INTO users VALUES ('Alice', 42);
    ///     INSERT INTO users VALUES ('Bob', 69);
    /// "#)?;
    ///
    /// assert_eq!(db.total_changes(), 2);
    /// assert!(db.execute_batch("INSERT INTO missing VALUES (1)").is_err());
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let Ok(sql) = CString::new(sql) else {
            return Err(Error::invalid_input("sql contains a nul byte"));
        };

        tracing::trace!(sql = ?sql, "executing batch");

        unsafe {
            sqlite3_try! {
                self.as_ptr(),
                ffi::sqlite3_exec(
                    self.as_ptr(),
                    sql.as_ptr(),
                    None,
                    ptr::null_mut(),
                    ptr::null_mut(),
                )
            };
        }

        Ok(())
    }

    /// Return the number of rows inserted, updated, or deleted by the most
    /// recently completed INSERT, UPDATE, or DELETE statement.
    #[inline]
    pub fn changes(&self) -> u64 {
        unsafe { ffi::sqlite3_changes64(self.as_ptr()) as u64 }
    }

    /// Return the total number of rows inserted, updated, and deleted since the
    /// connection was opened.
    #[inline]
    pub fn total_changes(&self) -> u64 {
        unsafe { ffi::sqlite3_total_changes64(self.as_ptr()) as u64 }
    }

    /// Return the rowid of the most recent successful INSERT, or 0 if there
    /// has been none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// assert_eq!(db.last_insert_rowid(), 0);
    ///
    /// db.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)", ())?;
    /// db.execute("INSERT INTO users (id, name) VALUES (?, ?)", (7, "Alice"))?;
    /// assert_eq!(db.last_insert_rowid(), 7);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    #[inline]
    pub fn last_insert_rowid(&self) -> i64 {
        unsafe { ffi::sqlite3_last_insert_rowid(self.as_ptr()) }
    }

    /// Wait up to `timeout` for locks held by other connections before failing
    /// with [`Code::BUSY`].
    ///
    /// A zero timeout disables waiting. Timeouts are truncated to whole
    /// milliseconds.
    ///
    /// [`Code::BUSY`]: crate::Code::BUSY
    pub fn busy_timeout(&self, timeout: Duration) -> Result<()> {
        let ms = c_int::try_from(timeout.as_millis()).unwrap_or(c_int::MAX);

        unsafe {
            sqlite3_try!(self.as_ptr(), ffi::sqlite3_busy_timeout(self.as_ptr(), ms));
        }

        Ok(())
    }
}

impl fmt::Debug for Database {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("raw", &self.raw.get())
            .finish()
    }
}
