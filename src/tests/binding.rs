use alloc::ffi::CString;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use anyhow::Result;

use crate::{BindValue, Database, ReadColumn, Statement, Value, ValueType};

/// Bind `value` to a single parameter and read it back through `SELECT ?`.
fn round_trip<T, O>(db: &Database, value: T, out: &mut O) -> Result<()>
where
    T: BindValue,
    O: ?Sized + ReadColumn,
{
    let mut stmt = db.prepare("SELECT ?")?;
    stmt.execute((value,))?;
    assert!(stmt.fetch(out)?);
    Ok(())
}

/// The storage class sqlite assigned to a bound value.
fn bound_type<T>(db: &Database, value: T) -> Result<ValueType>
where
    T: BindValue,
{
    let mut stmt = db.prepare("SELECT ?")?;
    assert!(stmt.execute((value,))?.is_row());
    Ok(stmt.column_type(0))
}

#[test]
fn integers() -> Result<()> {
    let db = Database::open_in_memory()?;

    macro_rules! check {
        ($($ty:ty),*) => {$({
            for value in [<$ty>::MIN, <$ty>::MAX, 0 as $ty, 1 as $ty] {
                let mut out: $ty = 7 as $ty;
                round_trip(&db, value, &mut out)?;
                assert_eq!(out, value, "{}", stringify!($ty));
            }

            assert_eq!(bound_type(&db, <$ty>::MAX)?, ValueType::INTEGER);
        })*};
    }

    check!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
    Ok(())
}

#[test]
fn unsigned_stored_as_signed() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut out = 0i64;
    round_trip(&db, u64::MAX, &mut out)?;
    assert_eq!(out, -1);

    let mut out = 0i32;
    round_trip(&db, u32::MAX, &mut out)?;
    assert_eq!(out, -1);
    Ok(())
}

#[test]
fn floats() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut out = 0.0f64;
    round_trip(&db, 42.69f64, &mut out)?;
    assert_eq!(out, 42.69);

    let mut out = 0.0f32;
    round_trip(&db, 1.5f32, &mut out)?;
    assert_eq!(out, 1.5);

    assert_eq!(bound_type(&db, 1.0f32)?, ValueType::FLOAT);
    Ok(())
}

#[test]
fn booleans() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut out = false;
    round_trip(&db, true, &mut out)?;
    assert!(out);

    round_trip(&db, false, &mut out)?;
    assert!(!out);

    let mut raw = -1i64;
    round_trip(&db, true, &mut raw)?;
    assert_eq!(raw, 1);

    let mut stmt = db.prepare("SELECT 2, -1, 0")?;
    let (mut a, mut b, mut c) = (false, false, true);
    assert!(stmt.fetch((&mut a, &mut b, &mut c))?);
    assert!(a && b && !c);

    let mut stmt = db.prepare("SELECT 4294967296, -4294967296")?;
    let (mut wide, mut negative) = (false, false);
    assert!(stmt.fetch((&mut wide, &mut negative))?);
    assert!(wide && negative);
    Ok(())
}

#[test]
fn text() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut out = String::from("previous contents");
    round_trip(&db, "hello", &mut out)?;
    assert_eq!(out, "hello");

    round_trip(&db, String::from("héllo wörld"), &mut out)?;
    assert_eq!(out, "héllo wörld");

    round_trip(&db, CString::new("from c")?, &mut out)?;
    assert_eq!(out, "from c");

    round_trip(&db, c"literal", &mut out)?;
    assert_eq!(out, "literal");

    round_trip(&db, "", &mut out)?;
    assert_eq!(out, "");
    assert_eq!(bound_type(&db, "")?, ValueType::TEXT);
    Ok(())
}

#[test]
fn text_is_copied_when_bound() -> Result<()> {
    let db = Database::open_in_memory()?;
    let mut stmt = db.prepare("SELECT ?")?;

    {
        let value = String::from("temporary");
        stmt.bind((&value,))?;
    }

    let mut out = String::new();
    assert!(stmt.fetch(&mut out)?);
    assert_eq!(out, "temporary");
    Ok(())
}

#[test]
fn text_invalid_utf8_is_replaced() -> Result<()> {
    let db = Database::open_in_memory()?;
    let mut stmt = db.prepare("SELECT CAST(X'68E96C6C6F' AS TEXT)")?;

    let mut out = String::new();
    assert!(stmt.fetch(&mut out)?);
    assert_eq!(out, "h\u{FFFD}llo");
    Ok(())
}

#[test]
fn text_with_interior_nul() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut stmt = db.prepare("SELECT length(CAST(? AS BLOB))")?;
    stmt.execute(("a\0b",))?;

    let mut len = 0i64;
    assert!(stmt.fetch(&mut len)?);
    assert_eq!(len, 3);
    Ok(())
}

#[test]
fn blobs() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut out = vec![0xffu8; 16];
    round_trip(&db, &[1u8, 2, 3][..], &mut out)?;
    assert_eq!(out, [1, 2, 3]);

    round_trip(&db, [4u8, 5], &mut out)?;
    assert_eq!(out, [4, 5]);

    round_trip(&db, vec![6u8], &mut out)?;
    assert_eq!(out, [6]);

    round_trip(&db, Vec::<u8>::new(), &mut out)?;
    assert!(out.is_empty());

    assert_eq!(bound_type(&db, [0u8; 4])?, ValueType::BLOB);
    Ok(())
}

#[test]
fn blob_truncated_into_smaller_buffer() -> Result<()> {
    let db = Database::open_in_memory()?;
    let data = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9];

    let mut view = [0xaau8; 4];
    round_trip(&db, data, &mut view[..])?;
    assert_eq!(view, [0, 1, 2, 3]);

    let mut array = [0xaau8; 4];
    round_trip(&db, data, &mut array)?;
    assert_eq!(array, [0, 1, 2, 3]);
    Ok(())
}

#[test]
fn blob_shorter_than_buffer_leaves_tail() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut buf = [0xaau8; 6];
    round_trip(&db, [1u8, 2], &mut buf)?;
    assert_eq!(buf, [1, 2, 0xaa, 0xaa, 0xaa, 0xaa]);
    Ok(())
}

#[test]
fn optional_values() -> Result<()> {
    let db = Database::open_in_memory()?;

    assert_eq!(bound_type(&db, None::<i64>)?, ValueType::NULL);
    assert_eq!(bound_type(&db, Some(1i64))?, ValueType::INTEGER);

    let mut out = Some(7i64);
    round_trip(&db, None::<i64>, &mut out)?;
    assert_eq!(out, None);

    round_trip(&db, Some(42i64), &mut out)?;
    assert_eq!(out, Some(42));

    let mut text = None::<String>;
    round_trip(&db, Some("hi"), &mut text)?;
    assert_eq!(text.as_deref(), Some("hi"));

    round_trip(&db, None::<&str>, &mut text)?;
    assert_eq!(text, None);
    Ok(())
}

#[test]
fn non_optional_read_of_null() -> Result<()> {
    let db = Database::open_in_memory()?;

    let mut number = 7i64;
    round_trip(&db, None::<i64>, &mut number)?;
    assert_eq!(number, 0);

    let mut text = String::from("previous");
    round_trip(&db, None::<&str>, &mut text)?;
    assert_eq!(text, "");

    let mut blob = vec![1u8];
    round_trip(&db, None::<&[u8]>, &mut blob)?;
    assert!(blob.is_empty());
    Ok(())
}

#[test]
fn dynamic_values() -> Result<()> {
    let db = Database::open_in_memory()?;

    let values = [
        Value::null(),
        Value::integer(-3),
        Value::float(0.25),
        Value::text("text"),
        Value::blob(vec![1u8, 2, 3]),
    ];

    for value in &values {
        let mut out = Value::integer(99);
        round_trip(&db, value, &mut out)?;
        assert_eq!(&out, value);
        assert_eq!(bound_type(&db, value)?, value.value_type());
    }

    let mut stmt = db.prepare("SELECT ?, ?, ?, ?, ?")?;
    stmt.execute(&values[..])?;

    let mut outs: [Value; 5] = Default::default();
    let [a, b, c, d, e] = &mut outs;
    assert!(stmt.fetch((a, b, c, d, e))?);
    assert_eq!(outs, values);
    Ok(())
}

/// A type stored as text.
#[derive(Debug, Default, PartialEq)]
struct Email(String);

impl BindValue for Email {
    fn bind_value(&self, stmt: &mut Statement, index: core::ffi::c_int) -> crate::Result<()> {
        self.0.bind_value(stmt, index)
    }
}

impl ReadColumn for Email {
    fn read_column(&mut self, stmt: &Statement, index: core::ffi::c_int) -> crate::Result<()> {
        self.0.read_column(stmt, index)
    }
}

#[test]
fn custom_type() -> Result<()> {
    let db = Database::open_in_memory()?;
    db.execute("CREATE TABLE users (email TEXT)", ())?;
    db.execute(
        "INSERT INTO users (email) VALUES (?), (?)",
        (Email(String::from("alice@example.com")), None::<Email>),
    )?;

    let mut stmt = db.prepare("SELECT email FROM users ORDER BY rowid")?;
    let mut email = None::<Email>;

    assert!(stmt.fetch(&mut email)?);
    assert_eq!(email, Some(Email(String::from("alice@example.com"))));

    assert!(stmt.fetch(&mut email)?);
    assert_eq!(email, None);

    assert!(!stmt.fetch(&mut email)?);
    Ok(())
}
