use core::ffi::{CStr, c_int};

use crate::ffi;

/// Return the version string of the SQLite library in use.
///
/// This may return a version string like `"3.50.4"`.
///
/// # Examples
///
/// ```
/// assert!(sqlbind::lib_version().starts_with("3."));
/// ```
#[inline]
pub fn lib_version() -> &'static str {
    unsafe {
        let ptr = ffi::sqlite3_libversion();

        if ptr.is_null() {
            return "";
        }

        CStr::from_ptr(ptr).to_str().unwrap_or_default()
    }
}

/// Return the version number of the SQLite library in use.
///
/// The version `3.50.4` as returned by [`lib_version`] would correspond to the
/// integer `3050004`.
///
/// # Examples
///
/// ```
/// let number = sqlbind::lib_version_number();
/// assert!(matches!(number, 3000000..4000000));
///
/// let minor = sqlbind::lib_version().split('.').nth(1).unwrap().parse::<i32>()?;
/// assert_eq!(number / 1000 % 1000, minor);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn lib_version_number() -> c_int {
    unsafe { ffi::sqlite3_libversion_number() }
}
