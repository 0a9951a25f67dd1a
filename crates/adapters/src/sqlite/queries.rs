use rusqlite::{params, Connection, Result};

/// A `files` row as stored, dates still in text form.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub file_name: String,
    pub date_created: String,
    pub date_copied: String,
    pub size: f64,
}

pub fn file_found(conn: &Connection, file_name: &str, date_created: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM files
            WHERE file_name = ?1 COLLATE NOCASE AND date_created = ?2
         )",
        params![file_name, date_created],
        |row| row.get::<_, i64>(0),
    )
    .map(|found| found != 0)
}

pub fn insert_file(
    conn: &Connection,
    file_name: &str,
    date_created: &str,
    date_copied: &str,
    size: f64,
) -> Result<()> {
    conn.execute(
        "INSERT INTO files (file_name, date_created, date_copied, size)
         VALUES (?1, ?2, ?3, ?4)",
        params![file_name, date_created, date_copied, size],
    )?;
    Ok(())
}

pub fn count_files(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))
}

pub fn list_files(conn: &Connection) -> Result<Vec<FileRow>> {
    let mut stmt = conn.prepare(
        "SELECT file_name, date_created, date_copied, size
         FROM files
         ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(FileRow {
            file_name: row.get(0)?,
            date_created: row.get(1)?,
            date_copied: row.get(2)?,
            size: row.get(3)?,
        })
    })?;

    rows.collect()
}
