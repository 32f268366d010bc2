use core::ffi::c_int;

use crate::utils::repeat;
use crate::{ReadColumn, Result, Statement};

/// A list of output locations populated from consecutive columns of the
/// current row.
///
/// This is implemented for a single `&mut T`, for tuples of `&mut T` up to 16
/// elements where each `T` implements [`ReadColumn`], and for `()` which reads
/// nothing.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
///
/// db.execute_batch(r#"
///     CREATE TABLE users (name TEXT, age INTEGER, photo BLOB);
///     INSERT INTO users VALUES ('Alice', 42, X'01020304');
/// "#)?;
///
/// let mut stmt = db.prepare("SELECT name, age, photo FROM users")?;
///
/// let mut name = String::new();
/// let mut age = 0u32;
/// let mut photo = Vec::<u8>::new();
///
/// assert!(stmt.fetch((&mut name, &mut age, &mut photo))?);
/// assert_eq!(name, "Alice");
/// assert_eq!(age, 42);
/// assert_eq!(photo, [1, 2, 3, 4]);
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub trait Columns {
    /// Read all columns, the first one at index `first`.
    fn read_columns(self, stmt: &Statement, first: c_int) -> Result<()>;
}

impl Columns for () {
    #[inline]
    fn read_columns(self, _: &Statement, _: c_int) -> Result<()> {
        Ok(())
    }
}

impl<T> Columns for &mut T
where
    T: ?Sized + ReadColumn,
{
    #[inline]
    fn read_columns(self, stmt: &Statement, first: c_int) -> Result<()> {
        self.read_column(stmt, first)
    }
}

macro_rules! implement_tuple {
    ($($ty:ident $var:ident $offset:literal),* $(,)?) => {
        impl<$($ty,)*> Columns for ($(&mut $ty,)*)
        where
            $($ty: ?Sized + ReadColumn,)*
        {
            #[inline]
            fn read_columns(self, stmt: &Statement, first: c_int) -> Result<()> {
                let ($($var,)*) = self;
                $(ReadColumn::read_column($var, stmt, first.saturating_add($offset))?;)*
                Ok(())
            }
        }
    };
}

repeat!(implement_tuple);
