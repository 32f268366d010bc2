use core::ffi::c_int;
use core::fmt;
use core::ptr;

use alloc::ffi::CString;

use crate::error::{Code, Error, Result};
use crate::ffi;
use crate::utils::{self, sqlite3_try};
use crate::{Bind, BindValue, Columns, Database, Handle, ReadColumn, ValueType};

/// The outcome of taking a [`step`].
///
/// [`step`]: Statement::step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum State {
    /// There is a row available for reading.
    Row,
    /// The statement has been entirely evaluated.
    Done,
}

impl State {
    /// Test if a row is available.
    #[inline]
    pub fn is_row(self) -> bool {
        matches!(self, State::Row)
    }

    /// Test if the statement has been entirely evaluated.
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, State::Done)
    }
}

/// A prepared statement.
///
/// A statement owns its compiled program and tracks whether a row produced by
/// the last [`step`] is waiting to be read. Statements keep their connection
/// alive, so they may outlive the [`Database`] they were prepared against.
///
/// [`step`]: Self::step
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE t (a INTEGER, b TEXT)", ())?;
/// db.execute("INSERT INTO t (a, b) VALUES (?, ?)", (42, "hi"))?;
///
/// let mut stmt = db.prepare("SELECT a, b FROM t")?;
///
/// let mut a = 0i64;
/// let mut b = String::new();
///
/// assert!(stmt.fetch((&mut a, &mut b))?);
/// assert_eq!(a, 42);
/// assert_eq!(b, "hi");
/// assert!(!stmt.fetch((&mut a, &mut b))?);
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub struct Statement {
    raw: Handle<*mut ffi::sqlite3_stmt>,
    has_row: bool,
}

impl Statement {
    /// Compile `sql` against the given database.
    ///
    /// Only the first statement in `sql` is compiled. Empty input, or input
    /// which only consists of whitespace and comments, is rejected as invalid
    /// input.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Database, Statement};
    ///
    /// let db = Database::open_in_memory()?;
    ///
    /// let stmt = Statement::new(&db, "SELECT 1")?;
    /// assert_eq!(stmt.column_count(), 1);
    ///
    /// assert!(Statement::new(&db, "").unwrap_err().is_invalid_input());
    /// assert!(Statement::new(&db, "-- nothing").unwrap_err().is_invalid_input());
    /// assert!(Statement::new(&db, "SELEKT 1").is_err());
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn new(db: &Database, sql: &str) -> Result<Self> {
        if sql.is_empty() {
            return Err(Error::invalid_input("empty sql statement"));
        }

        let Ok(len) = c_int::try_from(sql.len()) else {
            return Err(Error::new(Code::TOOBIG, "sql statement too long"));
        };

        let c = db.as_ptr();

        let mut raw = Handle::<*mut ffi::sqlite3_stmt>::new(ptr::null_mut(), |raw| unsafe {
            ffi::sqlite3_finalize(raw);
        });

        unsafe {
            sqlite3_try! {
                c,
                ffi::sqlite3_prepare_v2(
                    c,
                    sql.as_ptr().cast(),
                    len,
                    raw.as_mut_ptr(),
                    ptr::null_mut(),
                )
            };
        }

        if raw.is_invalid() {
            return Err(Error::invalid_input("sql contains no statement"));
        }

        tracing::trace!(sql, "prepared statement");

        Ok(Self {
            raw,
            has_row: false,
        })
    }

    /// Return the raw statement handle.
    ///
    /// The handle remains owned by this statement.
    #[inline]
    pub fn as_ptr(&self) -> *mut ffi::sqlite3_stmt {
        self.raw.get()
    }

    /// The connection this statement was prepared against.
    #[inline]
    pub(crate) fn connection_ptr(&self) -> *mut ffi::sqlite3 {
        unsafe { ffi::sqlite3_db_handle(self.raw.get()) }
    }

    /// Test if a row produced by the last step is waiting to be read.
    #[inline]
    pub fn has_row(&self) -> bool {
        self.has_row
    }

    /// Reset the statement so that it can be evaluated again.
    ///
    /// Bindings are retained, use [`unbind`] to clear them.
    ///
    /// [`unbind`]: Self::unbind
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
    ///     INSERT INTO users VALUES ('Alice', 72);
    ///     INSERT INTO users VALUES ('Bob', 40);
    /// "#)?;
    ///
    /// let mut stmt = db.prepare("SELECT name FROM users WHERE age > ? ORDER BY name")?;
    ///
    /// let mut results = Vec::new();
    /// let mut name = String::new();
    ///
    /// for age in [30, 50] {
    ///     stmt.reset()?;
    ///     stmt.bind((age,))?;
    ///
    ///     while stmt.fetch(&mut name)? {
    ///         results.push(name.clone());
    ///     }
    /// }
    ///
    /// assert_eq!(results, ["Alice", "Bob", "Alice"]);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn reset(&mut self) -> Result<()> {
        self.has_row = false;

        unsafe {
            sqlite3_try!(self.connection_ptr(), ffi::sqlite3_reset(self.as_ptr()));
        }

        Ok(())
    }

    /// Clear all parameter bindings, which makes them NULL.
    #[inline]
    pub fn unbind(&mut self) -> Result<()> {
        unsafe {
            sqlite3_try!(
                self.connection_ptr(),
                ffi::sqlite3_clear_bindings(self.as_ptr())
            );
        }

        Ok(())
    }

    /// Evaluate the statement until the next row or completion.
    ///
    /// If evaluation fails the error is returned and the statement is rewound,
    /// so that it can be reset and evaluated again.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Database, State};
    ///
    /// let db = Database::open_in_memory()?;
    /// let mut stmt = db.prepare("SELECT 1 UNION ALL SELECT 2")?;
    ///
    /// assert_eq!(stmt.step()?, State::Row);
    /// assert!(stmt.has_row());
    /// assert_eq!(stmt.step()?, State::Row);
    /// assert_eq!(stmt.step()?, State::Done);
    /// assert!(!stmt.has_row());
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn step(&mut self) -> Result<State> {
        match unsafe { ffi::sqlite3_step(self.as_ptr()) } {
            ffi::SQLITE_ROW => {
                self.has_row = true;
                Ok(State::Row)
            }
            ffi::SQLITE_DONE => {
                self.has_row = false;
                Ok(State::Done)
            }
            _ => {
                self.has_row = false;
                let error = Error::from_statement(self.as_ptr());

                // Resetting reports the failure of the last step again, which
                // has already been captured.
                unsafe {
                    ffi::sqlite3_reset(self.as_ptr());
                }

                Err(error)
            }
        }
    }

    /// Bind a single value to the parameter at `index`.
    ///
    /// The first parameter has index 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// let mut stmt = db.prepare("SELECT ? + ?")?;
    ///
    /// stmt.bind_value(1, 40)?;
    /// stmt.bind_value(2, 2)?;
    ///
    /// let mut sum = 0i32;
    /// assert!(stmt.fetch(&mut sum)?);
    /// assert_eq!(sum, 42);
    ///
    /// assert!(stmt.bind_value(3, 0).is_err());
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    #[inline]
    pub fn bind_value<T>(&mut self, index: c_int, value: T) -> Result<()>
    where
        T: BindValue,
    {
        value.bind_value(self, index)
    }

    /// Bind a list of parameters starting at index 1.
    #[inline]
    pub fn bind<P>(&mut self, params: P) -> Result<()>
    where
        P: Bind,
    {
        params.bind(self, 1)
    }

    /// Bind a list of parameters starting at index `first`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// let mut stmt = db.prepare("SELECT ?, ?, ?")?;
    ///
    /// stmt.bind_value(1, "first")?;
    /// stmt.bind_at(2, ("second", "third"))?;
    ///
    /// let (mut a, mut b, mut c) = (String::new(), String::new(), String::new());
    /// assert!(stmt.fetch((&mut a, &mut b, &mut c))?);
    /// assert_eq!([a, b, c], ["first", "second", "third"]);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    #[inline]
    pub fn bind_at<P>(&mut self, first: c_int, params: P) -> Result<()>
    where
        P: Bind,
    {
        params.bind(self, first)
    }

    /// Bind a value to a named parameter such as `:name`, `@name` or `$name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Code, Database};
    ///
    /// let db = Database::open_in_memory()?;
    /// let mut stmt = db.prepare("SELECT :greeting || ', ' || :name")?;
    ///
    /// stmt.bind_value_by_name(":name", "world")?;
    /// stmt.bind_value_by_name(":greeting", "hello")?;
    ///
    /// let mut out = String::new();
    /// assert!(stmt.fetch(&mut out)?);
    /// assert_eq!(out, "hello, world");
    ///
    /// let e = stmt.bind_value_by_name(":missing", 1).unwrap_err();
    /// assert_eq!(e.code(), Code::RANGE);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn bind_value_by_name<T>(&mut self, name: &str, value: T) -> Result<()>
    where
        T: BindValue,
    {
        let Some(index) = self.parameter_index(name)? else {
            return Err(Error::new(Code::RANGE, "no such parameter"));
        };

        value.bind_value(self, index)
    }

    /// Return the number of parameters in the statement.
    ///
    /// This is the largest parameter index, since parameters may be numbered
    /// explicitly like `?3`.
    #[inline]
    pub fn parameter_count(&self) -> c_int {
        unsafe { ffi::sqlite3_bind_parameter_count(self.as_ptr()) }
    }

    /// Return the index of a named parameter, or `None` if there is no such
    /// parameter.
    ///
    /// The name includes its prefix, like `:name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// db.execute("CREATE TABLE users (name TEXT)", ())?;
    ///
    /// let stmt = db.prepare("SELECT * FROM users WHERE name = :name")?;
    /// assert_eq!(stmt.parameter_index(":name")?, Some(1));
    /// assert_eq!(stmt.parameter_index(":asdf")?, None);
    /// assert!(stmt.parameter_index(":na\0me").unwrap_err().is_invalid_input());
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn parameter_index(&self, name: &str) -> Result<Option<c_int>> {
        let Ok(name) = CString::new(name) else {
            return Err(Error::invalid_input("parameter name contains a nul byte"));
        };

        let index = unsafe { ffi::sqlite3_bind_parameter_index(self.as_ptr(), name.as_ptr()) };

        match index {
            0 => Ok(None),
            _ => Ok(Some(index)),
        }
    }

    /// Return the number of columns in the result set.
    #[inline]
    pub fn column_count(&self) -> c_int {
        unsafe { ffi::sqlite3_column_count(self.as_ptr()) }
    }

    /// Return the name of a column, or `None` if the index is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// db.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
    /// let stmt = db.prepare("SELECT * FROM users")?;
    ///
    /// assert_eq!(stmt.column_name(0), Some("name"));
    /// assert_eq!(stmt.column_name(1), Some("age"));
    /// assert_eq!(stmt.column_name(2), None);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    #[inline]
    pub fn column_name(&self, index: c_int) -> Option<&str> {
        unsafe { utils::cstr_to_str(ffi::sqlite3_column_name(self.as_ptr(), index)) }
    }

    /// Return the storage class of a column in the current row.
    ///
    /// Without a row, or for an index out of range, this is
    /// [`ValueType::NULL`].
    #[inline]
    pub fn column_type(&self, index: c_int) -> ValueType {
        ValueType::new(unsafe { ffi::sqlite3_column_type(self.as_ptr(), index) })
    }

    /// Read the column at `index` of the current row into `out`.
    ///
    /// The first column has index 0.
    #[inline]
    pub fn column<T>(&self, index: c_int, out: &mut T) -> Result<()>
    where
        T: ?Sized + ReadColumn,
    {
        out.read_column(self, index)
    }

    /// Read consecutive columns of the current row starting at column 0.
    ///
    /// Unlike [`fetch`] this neither steps nor consumes the row.
    ///
    /// [`fetch`]: Self::fetch
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// let mut stmt = db.prepare("SELECT 'Alice', 42")?;
    /// assert!(stmt.step()?.is_row());
    ///
    /// let mut name = String::new();
    /// let mut age = 0u8;
    /// stmt.columns((&mut name, &mut age))?;
    /// assert_eq!((name.as_str(), age), ("Alice", 42));
    ///
    /// age = 0;
    /// stmt.columns_at(1, &mut age)?;
    /// assert_eq!(age, 42);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    #[inline]
    pub fn columns<C>(&self, outs: C) -> Result<()>
    where
        C: Columns,
    {
        outs.read_columns(self, 0)
    }

    /// Read consecutive columns of the current row starting at column
    /// `first`.
    #[inline]
    pub fn columns_at<C>(&self, first: c_int, outs: C) -> Result<()>
    where
        C: Columns,
    {
        outs.read_columns(self, first)
    }

    /// Reset the statement, clear its bindings, bind `params` and take one
    /// step.
    ///
    /// If the statement produced a row it is available to a subsequent
    /// [`fetch`].
    ///
    /// [`fetch`]: Self::fetch
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
    ///
    /// for (name, age) in [("Alice", 42), ("Bob", 69)] {
    ///     assert!(insert.execute((name, age))?.is_done());
    /// }
    ///
    /// let mut select = db.prepare("SELECT age FROM users WHERE name = ?")?;
    /// assert!(select.execute(("Bob",))?.is_row());
    ///
    /// let mut age = 0u32;
    /// assert!(select.fetch(&mut age)?);
    /// assert_eq!(age, 69);
    /// assert!(!select.fetch(&mut age)?);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn execute<P>(&mut self, params: P) -> Result<State>
    where
        P: Bind,
    {
        self.reset()?;
        self.unbind()?;
        self.bind(params)?;
        tracing::trace!(parameters = self.parameter_count(), "executing statement");
        self.step()
    }

    /// Read the next row into `outs`.
    ///
    /// If no row is waiting, the statement takes one step first. Returns
    /// `true` if a row was read and consumed, or `false` once the statement
    /// is done, in which case `outs` is left untouched. Calling this again
    /// after `false` restarts the statement from the beginning.
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
    ///     INSERT INTO users VALUES ('Alice', 42), ('Bob', 69), ('Charlie', 50);
    /// "#)?;
    ///
    /// let mut stmt = db.prepare("SELECT name, age FROM users WHERE age > ? ORDER BY age")?;
    /// stmt.execute((45,))?;
    ///
    /// let mut name = String::new();
    /// let mut age = 0u32;
    /// let mut rows = Vec::new();
    ///
    /// while stmt.fetch((&mut name, &mut age))? {
    ///     rows.push((name.clone(), age));
    /// }
    ///
    /// assert_eq!(rows, [("Charlie".to_string(), 50), ("Bob".to_string(), 69)]);
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub fn fetch<C>(&mut self, outs: C) -> Result<bool>
    where
        C: Columns,
    {
        if !self.has_row {
            self.step()?;
        }

        if !self.has_row {
            return Ok(false);
        }

        outs.read_columns(self, 0)?;
        self.has_row = false;
        Ok(true)
    }
}

impl fmt::Debug for Statement {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statement")
            .field("raw", &self.raw.get())
            .field("has_row", &self.has_row)
            .finish()
    }
}
