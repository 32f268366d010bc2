use core::ffi::{CStr, c_char};

#[cfg(feature = "std")]
use alloc::ffi::CString;

#[cfg(feature = "std")]
use std::path::Path;

#[cfg(feature = "std")]
use crate::error::{Error, Result};

/// Helper to evaluate sqlite3 calls against a connection.
///
/// The first argument is the raw connection whose error state is captured if
/// the call returns anything other than `SQLITE_OK`.
macro_rules! __sqlite3_try {
    ($c:expr, $expr:expr) => {{
        let code = $expr;

        if code != $crate::ffi::SQLITE_OK {
            return Err($crate::error::Error::from_connection($c));
        }
    }};
}

pub(crate) use __sqlite3_try as sqlite3_try;

/// Invoke the given macro once for every supported tuple arity.
///
/// Each element is passed as `Type variable offset`.
macro_rules! __repeat {
    ($macro:ident) => {
        $macro!(A a 0);
        $macro!(A a 0, B b 1);
        $macro!(A a 0, B b 1, C c 2);
        $macro!(A a 0, B b 1, C c 2, D d 3);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9, K k 10);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9, K k 10, L l 11);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9, K k 10, L l 11, M m 12);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9, K k 10, L l 11, M m 12, N n 13);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9, K k 10, L l 11, M m 12, N n 13, O o 14);
        $macro!(A a 0, B b 1, C c 2, D d 3, E e 4, F f 5, G g 6, H h 7, I i 8, J j 9, K k 10, L l 11, M m 12, N n 13, O o 14, P p 15);
    };
}

pub(crate) use __repeat as repeat;

/// Convert a c-string owned by sqlite into a rust string.
///
/// Returns `None` for null pointers and non UTF-8 contents.
pub(crate) unsafe fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }

    unsafe { CStr::from_ptr(s).to_str().ok() }
}

#[cfg(feature = "std")]
#[cfg(unix)]
pub(crate) fn path_to_cstring(p: &Path) -> Result<CString> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    let p: &OsStr = p.as_ref();

    match CString::new(p.as_bytes()) {
        Ok(string) => Ok(string),
        Err(..) => Err(Error::invalid_input("path contains an interior nul byte")),
    }
}

#[cfg(feature = "std")]
#[cfg(not(unix))]
pub(crate) fn path_to_cstring(p: &Path) -> Result<CString> {
    let Some(s) = p.to_str() else {
        return Err(Error::invalid_input("path is not valid UTF-8"));
    };

    match CString::new(s.as_bytes()) {
        Ok(string) => Ok(string),
        Err(..) => Err(Error::invalid_input("path contains an interior nul byte")),
    }
}
