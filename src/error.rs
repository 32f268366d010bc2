use core::error;
use core::ffi::{CStr, c_int};
use core::fmt;

use alloc::boxed::Box;
use alloc::string::String;

use crate::ffi;

/// A result type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An sqlite result code.
///
/// This can either be a primary code like [`Code::CONSTRAINT`] or an extended
/// code like [`Code::CONSTRAINT_NOTNULL`]. The primary code of an extended code
/// is available through [`Code::primary`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Code {
    raw: c_int,
}

impl Code {
    /// Construct a new code from the specified raw code.
    #[inline]
    pub(crate) const fn new(raw: c_int) -> Self {
        Self { raw }
    }
}

macro_rules! define_codes {
    ($(
        $vis:vis const $name:ident = $value:ident;
    )*) => {
        impl Code {
            $(
                $vis const $name: Code = Code::new($crate::ffi::$value as c_int);
            )*
        }

        impl fmt::Display for Code {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match *self {
                    $(Code::$name => write!(f, stringify!($name)),)*
                    Code { raw } => write!(f, "UNKNOWN({raw})"),
                }
            }
        }

        impl fmt::Debug for Code {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }
    };
}

define_codes! {
    pub const OK = SQLITE_OK;
    pub const ERROR = SQLITE_ERROR;
    pub const INTERNAL = SQLITE_INTERNAL;
    pub const PERM = SQLITE_PERM;
    pub const ABORT = SQLITE_ABORT;
    pub const BUSY = SQLITE_BUSY;
    pub const LOCKED = SQLITE_LOCKED;
    pub const NOMEM = SQLITE_NOMEM;
    pub const READONLY = SQLITE_READONLY;
    pub const INTERRUPT = SQLITE_INTERRUPT;
    pub const IOERR = SQLITE_IOERR;
    pub const CORRUPT = SQLITE_CORRUPT;
    pub const NOTFOUND = SQLITE_NOTFOUND;
    pub const FULL = SQLITE_FULL;
    pub const CANTOPEN = SQLITE_CANTOPEN;
    pub const PROTOCOL = SQLITE_PROTOCOL;
    pub const EMPTY = SQLITE_EMPTY;
    pub const SCHEMA = SQLITE_SCHEMA;
    pub const TOOBIG = SQLITE_TOOBIG;
    pub const CONSTRAINT = SQLITE_CONSTRAINT;
    pub const MISMATCH = SQLITE_MISMATCH;
    pub const MISUSE = SQLITE_MISUSE;
    pub const NOLFS = SQLITE_NOLFS;
    pub const AUTH = SQLITE_AUTH;
    pub const FORMAT = SQLITE_FORMAT;
    pub const RANGE = SQLITE_RANGE;
    pub const NOTADB = SQLITE_NOTADB;
    pub const NOTICE = SQLITE_NOTICE;
    pub const WARNING = SQLITE_WARNING;
    pub const IOERR_READ = SQLITE_IOERR_READ;
    pub const IOERR_SHORT_READ = SQLITE_IOERR_SHORT_READ;
    pub const IOERR_WRITE = SQLITE_IOERR_WRITE;
    pub const IOERR_FSYNC = SQLITE_IOERR_FSYNC;
    pub const IOERR_TRUNCATE = SQLITE_IOERR_TRUNCATE;
    pub const IOERR_NOMEM = SQLITE_IOERR_NOMEM;
    pub const IOERR_LOCK = SQLITE_IOERR_LOCK;
    pub const LOCKED_SHAREDCACHE = SQLITE_LOCKED_SHAREDCACHE;
    pub const BUSY_RECOVERY = SQLITE_BUSY_RECOVERY;
    pub const BUSY_SNAPSHOT = SQLITE_BUSY_SNAPSHOT;
    pub const CANTOPEN_NOTEMPDIR = SQLITE_CANTOPEN_NOTEMPDIR;
    pub const CANTOPEN_ISDIR = SQLITE_CANTOPEN_ISDIR;
    pub const CANTOPEN_FULLPATH = SQLITE_CANTOPEN_FULLPATH;
    pub const READONLY_RECOVERY = SQLITE_READONLY_RECOVERY;
    pub const READONLY_CANTLOCK = SQLITE_READONLY_CANTLOCK;
    pub const READONLY_ROLLBACK = SQLITE_READONLY_ROLLBACK;
    pub const ABORT_ROLLBACK = SQLITE_ABORT_ROLLBACK;
    pub const CONSTRAINT_CHECK = SQLITE_CONSTRAINT_CHECK;
    pub const CONSTRAINT_FOREIGNKEY = SQLITE_CONSTRAINT_FOREIGNKEY;
    pub const CONSTRAINT_NOTNULL = SQLITE_CONSTRAINT_NOTNULL;
    pub const CONSTRAINT_PRIMARYKEY = SQLITE_CONSTRAINT_PRIMARYKEY;
    pub const CONSTRAINT_TRIGGER = SQLITE_CONSTRAINT_TRIGGER;
    pub const CONSTRAINT_UNIQUE = SQLITE_CONSTRAINT_UNIQUE;
    pub const CONSTRAINT_ROWID = SQLITE_CONSTRAINT_ROWID;
}

impl Code {
    /// Return the numeric representation of the code.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Code;
    ///
    /// assert_eq!(Code::CONSTRAINT.as_raw(), 19);
    /// ```
    #[inline]
    pub fn as_raw(self) -> c_int {
        self.raw
    }

    /// Return the primary code, which is stored in the low 8 bits of an
    /// extended code.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Code;
    ///
    /// assert_eq!(Code::CONSTRAINT_NOTNULL.primary(), Code::CONSTRAINT);
    /// assert_eq!(Code::BUSY.primary(), Code::BUSY);
    /// ```
    #[inline]
    pub fn primary(self) -> Code {
        Code::new(self.raw & 0xff)
    }

    /// Return the english description sqlite uses for this code.
    fn description(self) -> &'static str {
        unsafe {
            let ptr = ffi::sqlite3_errstr(self.raw);

            if ptr.is_null() {
                return "unknown error";
            }

            CStr::from_ptr(ptr).to_str().unwrap_or("unknown error")
        }
    }
}

/// An error raised by this crate.
///
/// Errors either originate in sqlite, in which case they carry the message and
/// extended [`Code`] reported by the connection at the moment of failure, or
/// they are raised before sqlite is called because the input was invalid. The
/// latter are detected with [`Error::is_invalid_input`] and report
/// [`Code::MISUSE`].
///
/// # Examples
///
/// ```
/// use sqlbind::{Code, Database};
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE users (name TEXT NOT NULL)", ())?;
///
/// let e = db.execute("INSERT INTO users (name) VALUES (NULL)", ()).unwrap_err();
/// assert_eq!(e.code(), Code::CONSTRAINT_NOTNULL);
/// assert_eq!(e.primary_code(), Code::CONSTRAINT);
/// assert!(e.message().contains("NOT NULL"));
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub struct Error {
    kind: Kind,
}

enum Kind {
    Sqlite { code: Code, message: Box<str> },
    InvalidInput { message: &'static str },
}

impl Error {
    /// Construct a new error with an explicit code and message.
    #[inline]
    pub(crate) fn new(code: Code, message: impl Into<Box<str>>) -> Self {
        Self {
            kind: Kind::Sqlite {
                code,
                message: message.into(),
            },
        }
    }

    /// Construct an error for invalid input to this crate.
    #[inline]
    pub(crate) fn invalid_input(message: &'static str) -> Self {
        Self {
            kind: Kind::InvalidInput { message },
        }
    }

    /// Capture the last error recorded by the given connection.
    pub(crate) fn from_connection(c: *mut ffi::sqlite3) -> Self {
        if c.is_null() {
            // sqlite only fails to hand out a connection when allocation fails.
            return Self::new(Code::NOMEM, Code::NOMEM.description());
        }

        let (code, message) = unsafe {
            let code = Code::new(ffi::sqlite3_extended_errcode(c));
            let ptr = ffi::sqlite3_errmsg(c);

            let message = if ptr.is_null() {
                String::from(code.description())
            } else {
                CStr::from_ptr(ptr).to_string_lossy().into_owned()
            };

            (code, message)
        };

        tracing::debug!(code = %code, message = %message, "sqlite error");
        Self::new(code, message)
    }

    /// Capture the last error recorded by the connection owning the given
    /// statement.
    pub(crate) fn from_statement(stmt: *mut ffi::sqlite3_stmt) -> Self {
        let c = unsafe { ffi::sqlite3_db_handle(stmt) };
        Self::from_connection(c)
    }

    /// The extended error code that caused this error.
    ///
    /// For invalid input this is [`Code::MISUSE`].
    #[inline]
    pub fn code(&self) -> Code {
        match self.kind {
            Kind::Sqlite { code, .. } => code,
            Kind::InvalidInput { .. } => Code::MISUSE,
        }
    }

    /// The primary error code that caused this error.
    #[inline]
    pub fn primary_code(&self) -> Code {
        self.code().primary()
    }

    /// The human readable message associated with this error.
    #[inline]
    pub fn message(&self) -> &str {
        match &self.kind {
            Kind::Sqlite { message, .. } => message,
            Kind::InvalidInput { message } => message,
        }
    }

    /// Test if the error was raised because of invalid input, before any call
    /// into sqlite was made.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Database;
    ///
    /// let db = Database::open_in_memory()?;
    /// let e = db.prepare("").unwrap_err();
    /// assert!(e.is_invalid_input());
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind, Kind::InvalidInput { .. })
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Sqlite { code, message } => f
                .debug_struct("Error")
                .field("code", code)
                .field("message", message)
                .finish(),
            Kind::InvalidInput { message } => f
                .debug_struct("Error")
                .field("invalid_input", message)
                .finish(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Sqlite { code, message } => write!(f, "sqlite3 error {code}: {message}"),
            Kind::InvalidInput { message } => write!(f, "invalid input: {message}"),
        }
    }
}

impl error::Error for Error {}
