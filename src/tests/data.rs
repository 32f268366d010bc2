use crate::{Database, Result};

pub(super) fn english(db: &Database) -> Result<()> {
    db.execute_batch(
        r#"
        CREATE TABLE english (value TEXT);

        INSERT INTO english VALUES ('cerotype');
        INSERT INTO english VALUES ('metatype');
        INSERT INTO english VALUES ('ozotype');
        INSERT INTO english VALUES ('phenotype');
        INSERT INTO english VALUES ('plastotype');
        INSERT INTO english VALUES ('undertype');
        INSERT INTO english VALUES ('nonsence');
        "#,
    )?;

    Ok(())
}

pub(super) fn users(db: &Database) -> Result<()> {
    db.execute_batch(
        r#"
        CREATE TABLE users (id INTEGER, name TEXT, age REAL, photo BLOB, email TEXT);

        INSERT INTO users VALUES (1, 'Alice', 42.69, X'4269', NULL);
        "#,
    )?;

    Ok(())
}
