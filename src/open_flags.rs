use core::ffi::c_int;
use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::ffi;

/// Flags controlling how a [`Database`] is opened.
///
/// Flags are combined with the usual bitwise operators. Note that one of
/// [`READ_ONLY`] or [`READ_WRITE`] has to be part of the combination,
/// otherwise opening fails with [`Code::MISUSE`].
///
/// [`Database`]: crate::Database
/// [`READ_ONLY`]: Self::READ_ONLY
/// [`READ_WRITE`]: Self::READ_WRITE
/// [`Code::MISUSE`]: crate::Code::MISUSE
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, OpenFlags};
///
/// let mut flags = OpenFlags::CREATE | OpenFlags::READ_WRITE;
/// flags |= OpenFlags::NO_MUTEX;
///
/// assert!(flags.contains(OpenFlags::READ_WRITE | OpenFlags::NO_MUTEX));
/// assert!(!flags.contains(OpenFlags::READ_ONLY));
///
/// let db = Database::open(None, flags)?;
/// # Ok::<_, sqlbind::Error>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct OpenFlags {
    raw: c_int,
}

impl OpenFlags {
    /// No flags set.
    pub const NONE: Self = Self::from_raw(0);

    /// The database is opened in read-only mode. If the database does not
    /// already exist, an error is returned.
    pub const READ_ONLY: Self = Self::from_raw(ffi::SQLITE_OPEN_READONLY as c_int);

    /// The database is opened for reading and writing if possible, or reading
    /// only if the file is write protected by the operating system.
    pub const READ_WRITE: Self = Self::from_raw(ffi::SQLITE_OPEN_READWRITE as c_int);

    /// Create the database if it does not already exist. Must be combined
    /// with [`READ_WRITE`].
    ///
    /// [`READ_WRITE`]: Self::READ_WRITE
    pub const CREATE: Self = Self::from_raw(ffi::SQLITE_OPEN_CREATE as c_int);

    /// The filename is interpreted as a URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::{Database, OpenFlags};
    ///
    /// let flags = OpenFlags::URI | OpenFlags::READ_WRITE | OpenFlags::CREATE;
    /// let db = Database::open(Some("file:memdb?mode=memory"), flags)?;
    /// db.execute("CREATE TABLE test (value INTEGER)", ())?;
    /// # Ok::<_, sqlbind::Error>(())
    /// ```
    pub const URI: Self = Self::from_raw(ffi::SQLITE_OPEN_URI as c_int);

    /// The database is opened as an in-memory database, the filename is only
    /// used to name it for shared cache access.
    pub const MEMORY: Self = Self::from_raw(ffi::SQLITE_OPEN_MEMORY as c_int);

    /// Open the database in the multi-thread [threading mode][1].
    ///
    /// [1]: https://www.sqlite.org/threadsafe.html
    pub const NO_MUTEX: Self = Self::from_raw(ffi::SQLITE_OPEN_NOMUTEX as c_int);

    /// Open the database in the serialized [threading mode][1].
    ///
    /// [1]: https://www.sqlite.org/threadsafe.html
    pub const FULL_MUTEX: Self = Self::from_raw(ffi::SQLITE_OPEN_FULLMUTEX as c_int);

    /// Enable shared cache mode for this connection.
    pub const SHARED_CACHE: Self = Self::from_raw(ffi::SQLITE_OPEN_SHAREDCACHE as c_int);

    /// Disable shared cache mode for this connection.
    pub const PRIVATE_CACHE: Self = Self::from_raw(ffi::SQLITE_OPEN_PRIVATECACHE as c_int);

    /// Refuse to open the database if the filename is a symbolic link.
    pub const NO_FOLLOW: Self = Self::from_raw(ffi::SQLITE_OPEN_NOFOLLOW as c_int);

    /// Report extended result codes from the engine.
    ///
    /// Errors raised by this crate always carry the extended code, this flag
    /// only affects the raw status codes returned by sqlite itself.
    pub const EXTENDED_RESULT_CODES: Self = Self::from_raw(ffi::SQLITE_OPEN_EXRESCODE as c_int);

    /// Construct flags from a raw sqlite flag value.
    #[inline]
    pub const fn from_raw(raw: c_int) -> Self {
        Self { raw }
    }

    /// Return the raw sqlite flag value.
    #[inline]
    pub const fn as_raw(self) -> c_int {
        self.raw
    }

    /// Test if all flags in `other` are set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.raw & other.raw == other.raw
    }

    /// Test if no flags are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.raw == 0
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self::from_raw(self.raw | rhs.raw)
    }
}

impl BitOrAssign for OpenFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.raw |= rhs.raw;
    }
}

impl BitAnd for OpenFlags {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self::from_raw(self.raw & rhs.raw)
    }
}

impl BitAndAssign for OpenFlags {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.raw &= rhs.raw;
    }
}

impl BitXor for OpenFlags {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self::from_raw(self.raw ^ rhs.raw)
    }
}

impl BitXorAssign for OpenFlags {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        self.raw ^= rhs.raw;
    }
}

/// Complement of a flag set.
///
/// # Examples
///
/// ```
/// use sqlbind::OpenFlags;
///
/// let flags = OpenFlags::CREATE | OpenFlags::READ_WRITE | OpenFlags::NO_MUTEX;
/// let flags = flags & !OpenFlags::NO_MUTEX;
///
/// assert_eq!(flags, OpenFlags::CREATE | OpenFlags::READ_WRITE);
/// ```
impl Not for OpenFlags {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_raw(!self.raw)
    }
}

impl fmt::Debug for OpenFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: &[(OpenFlags, &str)] = &[
            (OpenFlags::READ_ONLY, "READ_ONLY"),
            (OpenFlags::READ_WRITE, "READ_WRITE"),
            (OpenFlags::CREATE, "CREATE"),
            (OpenFlags::URI, "URI"),
            (OpenFlags::MEMORY, "MEMORY"),
            (OpenFlags::NO_MUTEX, "NO_MUTEX"),
            (OpenFlags::FULL_MUTEX, "FULL_MUTEX"),
            (OpenFlags::SHARED_CACHE, "SHARED_CACHE"),
            (OpenFlags::PRIVATE_CACHE, "PRIVATE_CACHE"),
            (OpenFlags::NO_FOLLOW, "NO_FOLLOW"),
            (OpenFlags::EXTENDED_RESULT_CODES, "EXTENDED_RESULT_CODES"),
        ];

        let mut rest = *self;
        let mut set = f.debug_set();

        for &(flag, name) in NAMES {
            if rest.contains(flag) {
                set.entry(&format_args!("{name}"));
                rest &= !flag;
            }
        }

        if !rest.is_empty() {
            set.entry(&format_args!("{:#x}", rest.raw));
        }

        set.finish()
    }
}
