/// Applied on every open. Existing ledgers are reused as they are.
pub const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS files (
        file_name TEXT NOT NULL,
        date_created TEXT NOT NULL,
        date_copied TEXT NOT NULL,
        size REAL NOT NULL
    );",
    "CREATE INDEX IF NOT EXISTS files_name_created
        ON files (file_name COLLATE NOCASE, date_created);",
];
