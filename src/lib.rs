//! Type-safe bindings for [SQLite] prepared statements.
//!
//! Parameters are bound and result columns are read through two small traits,
//! [`BindValue`] and [`ReadColumn`], which map Rust types onto the binding and
//! column access primitives of SQLite. Lists of parameters and output locations
//! are written as tuples, so a whole row is bound or fetched in one call
//! without index bookkeeping.
//!
//! Connections and statements own their SQLite resources through [`Handle`],
//! which releases them exactly once, regardless of how the owner goes out of
//! scope.
//!
//! <br>
//!
//! ## Usage
//!
//! Open a [`Database`], [`prepare`] a [`Statement`], then [`execute`] it with
//! parameters and [`fetch`] rows into existing variables:
//!
//! ```
//! use sqlbind::Database;
//!
//! let db = Database::open_in_memory()?;
//!
//! db.execute("CREATE TABLE users (name TEXT NOT NULL, age INTEGER)", ())?;
//!
//! let mut insert = db.prepare("INSERT INTO users (name, age) VALUES (?, ?)")?;
//! insert.execute(("Alice", Some(42)))?;
//! insert.execute(("Bob", None::<u32>))?;
//!
//! let mut select = db.prepare("SELECT name, age FROM users ORDER BY name")?;
//!
//! let mut name = String::new();
//! let mut age = None::<u32>;
//! let mut rows = Vec::new();
//!
//! while select.fetch((&mut name, &mut age))? {
//!     rows.push((name.clone(), age));
//! }
//!
//! assert_eq!(rows, [("Alice".to_string(), Some(42)), ("Bob".to_string(), None)]);
//! # Ok::<_, sqlbind::Error>(())
//! ```
//!
//! Reading is done in place, so buffers like [`String`] and [`Vec<u8>`] are
//! reused from row to row.
//!
//! <br>
//!
//! ## Custom types
//!
//! Any type can take part in binding by implementing [`BindValue`], and in
//! reading by implementing [`ReadColumn`]. Using a type which implements
//! neither is a compile error:
//!
//! ```compile_fail
//! use sqlbind::Database;
//!
//! struct Unknown;
//!
//! let db = Database::open_in_memory()?;
//! db.execute("SELECT ?", (Unknown,))?;
//! # Ok::<_, sqlbind::Error>(())
//! ```
//!
//! <br>
//!
//! ## Features
//!
//! * `std` - Enable usage of the Rust standard library, which adds
//!   [`Database::open_path`]. Enabled by default.
//! * `alloc` - Enable usage of the Rust alloc library. This is required and is
//!   enabled by default. Disabling this option will currently cause a compile
//!   error.
//! * `bundled` - Build and link a bundled copy of SQLite through
//!   [`libsqlite3-sys`]. Enabled by default.
//!
//! <br>
//!
//! ## Logging
//!
//! Opening databases, preparing and executing statements emit [`tracing`]
//! events at the `TRACE` level, and every captured SQLite error is emitted at
//! the `DEBUG` level. No subscriber is installed by this crate.
//!
//! [`execute`]: Statement::execute
//! [`fetch`]: Statement::fetch
//! [`libsqlite3-sys`]: https://crates.io/crates/libsqlite3-sys
//! [`String`]: alloc::string::String
//! [`Vec<u8>`]: alloc::vec::Vec
//! [`prepare`]: Database::prepare
//! [`tracing`]: https://docs.rs/tracing
//! [SQLite]: https://www.sqlite.org

#![no_std]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(not(feature = "alloc"))]
compile_error!("The `alloc` feature must be enabled to use this crate.");


mod bind;
mod bind_value;
mod columns;
mod database;
mod error;
mod ffi;
mod handle;
mod open_flags;
mod read_column;
mod statement;
mod utils;
mod value;
mod value_type;
mod version;

#[doc(inline)]
pub use self::bind::Bind;
#[doc(inline)]
pub use self::bind_value::BindValue;
#[doc(inline)]
pub use self::columns::Columns;
#[doc(inline)]
pub use self::database::Database;
#[doc(inline)]
pub use self::error::{Code, Error, Result};
#[doc(inline)]
pub use self::handle::{Handle, Invalid};
#[doc(inline)]
pub use self::open_flags::OpenFlags;
#[doc(inline)]
pub use self::read_column::ReadColumn;
#[doc(inline)]
pub use self::statement::{State, Statement};
#[doc(inline)]
pub use self::value::{Null, Value};
#[doc(inline)]
pub use self::value_type::ValueType;
#[doc(inline)]
pub use self::version::{lib_version, lib_version_number};
