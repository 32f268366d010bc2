use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use anyhow::Result;

use crate::{Code, Database, Null, Value, ValueType};

use super::data;

// Test cases copied from https://github.com/stainless-steel/sqlite under the
// MIT license.

#[test]
fn database_change_count() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    assert_eq!(db.changes(), 1);
    assert_eq!(db.total_changes(), 1);

    db.execute("INSERT INTO users VALUES (2, 'Bob', NULL, NULL, NULL)", ())?;
    assert_eq!(db.changes(), 1);
    assert_eq!(db.total_changes(), 2);

    db.execute("UPDATE users SET name = 'Bob' WHERE id = 1", ())?;
    assert_eq!(db.changes(), 1);
    assert_eq!(db.total_changes(), 3);

    db.execute("DELETE FROM users", ())?;
    assert_eq!(db.changes(), 2);
    assert_eq!(db.total_changes(), 5);
    Ok(())
}

#[test]
fn database_error() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let e = db.execute(":)", ()).unwrap_err();
    assert_eq!(e.code(), Code::ERROR);
    assert!(!e.is_invalid_input());
    assert!(!e.message().is_empty());

    let e = db.execute_batch(":)").unwrap_err();
    assert_eq!(e.code(), Code::ERROR);
    Ok(())
}

#[test]
fn database_last_insert_rowid() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    db.execute("INSERT INTO users (id, name) VALUES (?, ?)", (2, "Bob"))?;
    assert_eq!(db.last_insert_rowid(), 2);
    Ok(())
}

#[test]
fn statement_bind() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("INSERT INTO users VALUES (?, ?, ?, ?, ?)")?;

    stmt.bind_value(1, 2i64)?;
    stmt.bind_value(2, "Bob")?;
    stmt.bind_value(3, 69.42)?;
    stmt.bind_value(4, &[0x69u8, 0x42u8][..])?;
    stmt.bind_value(5, Null)?;

    assert!(stmt.step()?.is_done());
    Ok(())
}

#[test]
fn statement_bind_tuple() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("INSERT INTO users VALUES (?, ?, ?, ?, ?)")?;
    stmt.bind((2i64, "Bob", 69.42, &[0x69u8, 0x42u8][..], Null))?;
    assert!(stmt.step()?.is_done());

    let mut stmt = db.prepare("SELECT count(*) FROM users WHERE name = ? AND photo = ?")?;
    stmt.execute(("Bob", vec![0x69u8, 0x42u8]))?;

    let mut count = 0i64;
    assert!(stmt.fetch(&mut count)?);
    assert_eq!(count, 1);
    Ok(())
}

#[test]
fn statement_bind_with_nullable() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("INSERT INTO users VALUES (?, ?, ?, ?, ?)")?;

    stmt.bind_value(1, None::<i64>)?;
    stmt.bind_value(2, None::<&str>)?;
    stmt.bind_value(3, None::<f64>)?;
    stmt.bind_value(4, None::<&[u8]>)?;
    stmt.bind_value(5, None::<&str>)?;

    assert!(stmt.step()?.is_done());

    let mut stmt = db.prepare("INSERT INTO users VALUES (?, ?, ?, ?, ?)")?;

    stmt.bind_value(1, Some(2i64))?;
    stmt.bind_value(2, Some("Bob"))?;
    stmt.bind_value(3, Some(69.42))?;
    stmt.bind_value(4, Some(&[0x69u8, 0x42u8][..]))?;
    stmt.bind_value(5, None::<&str>)?;
    assert!(stmt.step()?.is_done());

    let mut stmt = db.prepare("SELECT count(*) FROM users WHERE id IS NULL")?;
    let mut count = 0i64;
    assert!(stmt.fetch(&mut count)?);
    assert_eq!(count, 1);
    Ok(())
}

#[test]
fn statement_bind_by_name() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("INSERT INTO users VALUES (:id, :name, :age, :photo, :email)")?;

    stmt.bind_value_by_name(":id", 2i64)?;
    stmt.bind_value_by_name(":name", "Bob")?;
    stmt.bind_value_by_name(":age", 69.42)?;
    stmt.bind_value_by_name(":photo", &[0x69u8, 0x42u8][..])?;
    stmt.bind_value_by_name(":email", Null)?;
    assert!(stmt.bind_value_by_name(":missing", 404).is_err());
    assert!(stmt.step()?.is_done());
    Ok(())
}

#[test]
fn statement_column_count() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("SELECT * FROM users")?;
    assert!(stmt.step()?.is_row());
    assert_eq!(stmt.column_count(), 5);
    Ok(())
}

#[test]
fn statement_column_name() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let stmt = db.prepare("SELECT id, name, age, photo AS user_photo FROM users")?;

    let names = (0..stmt.column_count())
        .flat_map(|i| stmt.column_name(i))
        .collect::<Vec<_>>();

    assert_eq!(names, ["id", "name", "age", "user_photo"]);
    assert_eq!(stmt.column_name(3), Some("user_photo"));
    assert_eq!(stmt.column_name(4), None);
    Ok(())
}

#[test]
fn statement_column_type() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("SELECT * FROM users")?;

    assert_eq!(stmt.column_type(0), ValueType::NULL);
    assert!(stmt.step()?.is_row());

    assert_eq!(stmt.column_type(0), ValueType::INTEGER);
    assert_eq!(stmt.column_type(1), ValueType::TEXT);
    assert_eq!(stmt.column_type(2), ValueType::FLOAT);
    assert_eq!(stmt.column_type(3), ValueType::BLOB);
    assert_eq!(stmt.column_type(4), ValueType::NULL);
    assert_eq!(stmt.column_type(5), ValueType::NULL);
    Ok(())
}

#[test]
fn statement_parameter_index() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let statement = "INSERT INTO users VALUES (:id, :name, :age, :photo, :email)";
    let mut stmt = db.prepare(statement)?;
    assert_eq!(stmt.parameter_count(), 5);

    let index = |stmt: &crate::Statement, name: &str| -> Result<i32> {
        stmt.parameter_index(name)?
            .ok_or_else(|| anyhow::anyhow!("missing parameter {name}"))
    };

    stmt.bind_value(index(&stmt, ":id")?, 2)?;
    stmt.bind_value(index(&stmt, ":name")?, "Bob")?;
    stmt.bind_value(index(&stmt, ":age")?, 69.42)?;
    stmt.bind_value(index(&stmt, ":photo")?, &[0x69u8, 0x42u8][..])?;
    stmt.bind_value(index(&stmt, ":email")?, Null)?;
    assert_eq!(stmt.parameter_index(":missing")?, None);
    assert!(stmt.step()?.is_done());
    Ok(())
}

#[test]
fn statement_read() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("SELECT * FROM users")?;

    let mut id = 0i64;
    let mut name = String::new();
    let mut age = 0.0f64;
    let mut photo = Vec::<u8>::new();
    let mut email = Value::integer(1);

    assert!(stmt.step()?.is_row());
    stmt.column(0, &mut id)?;
    stmt.column(1, &mut name)?;
    stmt.column(2, &mut age)?;
    stmt.column(3, &mut photo)?;
    stmt.column(4, &mut email)?;

    assert_eq!(id, 1);
    assert_eq!(name, "Alice");
    assert_eq!(age, 42.69);
    assert_eq!(photo, [0x42, 0x69]);
    assert_eq!(email, Value::null());
    assert!(stmt.step()?.is_done());
    Ok(())
}

#[test]
fn statement_read_with_nullable() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("SELECT * FROM users")?;

    let mut id = None::<i64>;
    let mut name = None::<String>;
    let mut age = None::<f64>;
    let mut photo = None::<Vec<u8>>;
    let mut email = Some(String::from("alice@example.com"));

    assert!(stmt.fetch((&mut id, &mut name, &mut age, &mut photo, &mut email))?);

    assert_eq!(id, Some(1));
    assert_eq!(name, Some(String::from("Alice")));
    assert_eq!(age, Some(42.69));
    assert_eq!(photo, Some(vec![0x42, 0x69]));
    assert_eq!(email, None);
    assert!(!stmt.fetch(())?);
    Ok(())
}

#[test]
fn statement_wildcard() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::english(&db)?;

    let mut stmt = db.prepare("SELECT value FROM english WHERE value LIKE '%type'")?;

    let mut count = 0;

    while stmt.step()?.is_row() {
        count += 1;
    }

    assert_eq!(count, 6);
    Ok(())
}

#[test]
fn statement_wildcard_with_binding() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::english(&db)?;

    let mut stmt = db.prepare("SELECT value FROM english WHERE value LIKE ?")?;

    stmt.bind_value(1, "%type")?;

    let mut count = 0;

    while stmt.fetch(())? {
        count += 1;
    }

    assert_eq!(count, 6);
    Ok(())
}

#[test]
fn dropped_database() -> Result<()> {
    let db = Database::open_in_memory()?;
    data::users(&db)?;

    let mut stmt = db.prepare("SELECT id, name, age, photo AS user_photo FROM users")?;
    drop(db);

    assert_eq!(stmt.column_name(3), Some("user_photo"));

    let mut name = String::new();
    assert!(stmt.fetch((&mut Null, &mut name))?);
    assert_eq!(name, "Alice");
    assert!(!stmt.fetch(())?);
    Ok(())
}
