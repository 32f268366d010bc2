pub(crate) use libsqlite3_sys::*;

use core::ffi::c_int;

// libsqlite3-sys leaves `sqlite3_close_v2` out of its generated bindings, but
// the library still exports it. The v2 close defers releasing a connection
// until its last statement is finalized.
unsafe extern "C" {
    pub(crate) fn sqlite3_close_v2(db: *mut sqlite3) -> c_int;
}
