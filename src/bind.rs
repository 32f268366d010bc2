use core::ffi::c_int;

use crate::utils::repeat;
use crate::{BindValue, Result, Statement};

/// A list of parameters bound at consecutive positions of a [`Statement`].
///
/// This is implemented for tuples of [`BindValue`] types up to 16 elements,
/// for `()` which binds nothing, and for slices of values of the same type.
///
/// Note that a single value has to be wrapped in a one-element tuple like
/// `(42,)`.
///
/// # Examples
///
/// ```
/// use sqlbind::{Database, Value};
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE users (name TEXT, age INTEGER)", ())?;
///
/// db.execute("INSERT INTO users (name, age) VALUES (?, ?)", ("Alice", 42))?;
///
/// let params = [Value::text("Bob"), Value::integer(69)];
/// db.execute("INSERT INTO users (name, age) VALUES (?, ?)", &params[..])?;
///
/// let mut stmt = db.prepare("SELECT sum(age) FROM users")?;
/// let mut sum = 0i64;
/// assert!(stmt.fetch(&mut sum)?);
/// assert_eq!(sum, 111);
/// # Ok::<_, sqlbind::Error>(())
/// ```
pub trait Bind {
    /// Bind all parameters, the first one at index `first`.
    fn bind(&self, stmt: &mut Statement, first: c_int) -> Result<()>;
}

impl<T> Bind for &T
where
    T: ?Sized + Bind,
{
    #[inline]
    fn bind(&self, stmt: &mut Statement, first: c_int) -> Result<()> {
        (**self).bind(stmt, first)
    }
}

/// [`Bind`] implementation for an empty parameter list.
///
/// # Examples
///
/// ```
/// use sqlbind::Database;
///
/// let db = Database::open_in_memory()?;
/// db.execute("CREATE TABLE config (key TEXT, value TEXT)", ())?;
///
/// let mut insert = db.prepare("INSERT INTO config VALUES ('version', '1.0.0')")?;
/// insert.execute(())?;
/// # Ok::<_, sqlbind::Error>(())
/// ```
impl Bind for () {
    #[inline]
    fn bind(&self, _: &mut Statement, _: c_int) -> Result<()> {
        Ok(())
    }
}

/// [`Bind`] implementation for a slice, binding each element in order.
impl<T> Bind for [T]
where
    T: BindValue,
{
    fn bind(&self, stmt: &mut Statement, first: c_int) -> Result<()> {
        let mut index = first;

        for value in self {
            value.bind_value(stmt, index)?;
            index = index.saturating_add(1);
        }

        Ok(())
    }
}

macro_rules! implement_tuple {
    ($($ty:ident $var:ident $offset:literal),* $(,)?) => {
        /// [`Bind`] implementation for a tuple, binding elements one after
        /// another.
        impl<$($ty,)*> Bind for ($($ty,)*)
        where
            $($ty: BindValue,)*
        {
            #[inline]
            fn bind(&self, stmt: &mut Statement, first: c_int) -> Result<()> {
                let ($($var,)*) = self;
                $(BindValue::bind_value($var, stmt, first.saturating_add($offset))?;)*
                Ok(())
            }
        }
    };
}

repeat!(implement_tuple);
