use std::io::{self, Write};
use std::time::Instant;

use sqlbind::{Database, OpenFlags};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let flags = OpenFlags::CREATE | OpenFlags::READ_WRITE | OpenFlags::NO_MUTEX;
    let db = Database::open(None, flags)?;

    db.execute(
        r#"
        CREATE TABLE IF NOT EXISTS persons (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT
        )
        "#,
        (),
    )?;

    let mut insert = db.prepare("INSERT INTO persons (name, email) VALUES (?, ?)")?;

    for (name, email) in [
        ("Steven", Some("steven@example.com")),
        ("John", None),
        ("Alex", Some("alex@example.com")),
    ] {
        insert.execute((name, email))?;
    }

    let mut stmt = db.prepare("SELECT id, name, email FROM persons")?;

    let mut id = 0i32;
    let mut name = String::new();
    let mut email = None::<String>;

    let mut o = io::sink();

    let start = Instant::now();
    let mut c = 0;

    for _ in 0..100_000 {
        stmt.reset()?;

        writeln!(o, "Found persons:")?;

        while stmt.fetch((&mut id, &mut name, &mut email))? {
            c += 1;
            writeln!(o, "ID: {id}, Name: {name}, Email: {}", email.as_deref().unwrap_or("-"))?;
        }
    }

    println!("Elapsed: {:?}", start.elapsed());
    println!("Total persons found: {c}");
    Ok(())
}
